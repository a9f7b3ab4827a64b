//! Auth feature view.

use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::{AuthField, AuthMode};
use crate::render::{centered_rect, render_container, spinner};
use crate::state::AppState;

const POPUP_WIDTH: u16 = 56;
const LABEL_WIDTH: u16 = 10;

/// Renders the login or signup screen.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let mode = AuthMode::from_screen(app.screen).unwrap_or(AuthMode::Login);
    let fields = AuthField::order(mode);

    let title = match mode {
        AuthMode::Login => " tudu — sign in ",
        AuthMode::Signup => " tudu — create account ",
    };

    let popup_height = fields.len() as u16 + 6;
    let popup = centered_rect(area, POPUP_WIDTH, popup_height);
    render_container(frame, popup, title, Color::Cyan);

    let inner = ratatui::layout::Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let mut lines: Vec<Line<'static>> = Vec::new();
    for field in fields {
        let focused = app.auth.focus == *field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{marker}{:<width$}", field.label(), width = LABEL_WIDTH as usize - 2),
                label_style,
            ),
            Span::raw(app.auth.field(*field).display()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(status_line(app, mode));
    lines.push(Line::from(""));

    let toggle_hint = match mode {
        AuthMode::Login => "ctrl+s create account",
        AuthMode::Signup => "ctrl+s sign in instead",
    };
    lines.push(Line::from(Span::styled(
        format!("enter submit · tab fields · {toggle_hint} · ctrl+c quit"),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);

    // Cursor on the focused field (hidden while a request is in flight).
    if !app.tasks.auth.is_running()
        && let Some(row) = fields.iter().position(|f| *f == app.auth.focus)
    {
        let x = inner.x + LABEL_WIDTH + app.auth.field(app.auth.focus).width_before_cursor();
        let y = inner.y + row as u16;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), y));
    }
}

fn status_line(app: &AppState, mode: AuthMode) -> Line<'static> {
    if app.tasks.auth.is_running() {
        let verb = match mode {
            AuthMode::Login => "Signing in",
            AuthMode::Signup => "Creating account",
        };
        return Line::from(Span::styled(
            format!("{} {verb}...", spinner(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(error) = &app.auth.error {
        return Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    Line::from("")
}
