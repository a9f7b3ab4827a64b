//! Dashboard view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::TodoFormField;
use crate::render::{centered_rect, render_container, spinner};
use crate::state::AppState;

const FORM_WIDTH: u16 = 60;
const FORM_LABEL_WIDTH: u16 = 13;

/// Renders the dashboard: header, list, status line, hints.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),   // list
            Constraint::Length(1), // status
            Constraint::Length(1), // hints
        ])
        .split(area);

    render_header(app, frame, rows[0]);
    render_list(app, frame, rows[1]);
    render_status(app, frame, rows[2]);
    render_hints(frame, rows[3]);

    if app.todos.form.is_some() {
        render_form(app, frame, area);
    }
}

fn render_header(app: &AppState, frame: &mut Frame, area: Rect) {
    let who = app
        .session
        .user
        .as_ref()
        .map_or_else(String::new, |u| u.display_name().to_string());

    let mut spans = vec![
        Span::styled(" tudu ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(who, Style::default().fg(Color::Gray)),
    ];
    if app.tasks.restore.is_running() {
        spans.push(Span::styled(
            "  validating session...",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(app: &AppState, frame: &mut Frame, area: Rect) {
    if app.tasks.todos_fetch.is_running() {
        let line = Line::from(Span::styled(
            format!(" {} Loading todos...", spinner(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    if app.todos.items.is_empty() {
        let line = Line::from(Span::styled(
            " No todos yet. Press n to add one.",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Keep the selected row visible within the viewport.
    let height = area.height as usize;
    let first = app
        .todos
        .selected
        .saturating_sub(height.saturating_sub(1))
        .min(app.todos.items.len().saturating_sub(height));

    let lines: Vec<Line<'static>> = app
        .todos
        .items
        .iter()
        .enumerate()
        .skip(first)
        .take(height)
        .map(|(idx, todo)| {
            let check = if todo.completed { "✓" } else { " " };
            let selected = idx == app.todos.selected;

            let title_style = if todo.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![
                Span::styled(if selected { "▸ " } else { "  " }, Style::default().fg(Color::Cyan)),
                Span::styled(format!("[{check}] "), Style::default().fg(Color::Green)),
                Span::styled(todo.title.clone(), title_style),
            ];
            if !todo.description.is_empty() {
                spans.push(Span::styled(
                    format!(" — {}", todo.description),
                    Style::default().fg(Color::Gray),
                ));
            }

            let line = Line::from(spans);
            if selected {
                line.style(Style::default().bg(Color::Rgb(30, 30, 46)))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(app: &AppState, frame: &mut Frame, area: Rect) {
    let busy = app.tasks.todo_create.is_running()
        || app.tasks.todo_update.is_running()
        || app.tasks.todo_delete.is_running();

    let line = if busy {
        Line::from(Span::styled(
            format!(" {} Saving...", spinner(app.spinner_frame)),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &app.todos.error {
        Line::from(Span::styled(
            format!(" Error: {error}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        " n new · e edit · space toggle · d delete · r refresh · ctrl+l logout · q quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form(app: &AppState, frame: &mut Frame, area: Rect) {
    let Some(form) = &app.todos.form else {
        return;
    };

    let title = if form.editing.is_some() {
        " edit todo "
    } else {
        " new todo "
    };

    let popup = centered_rect(area, FORM_WIDTH, 7);
    render_container(frame, popup, title, Color::Cyan);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let field_line = |label: &str, value: String, focused: bool| {
        let marker = if focused { "▸ " } else { "  " };
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(
                format!("{marker}{:<width$}", label, width = FORM_LABEL_WIDTH as usize - 2),
                style,
            ),
            Span::raw(value),
        ])
    };

    let lines = vec![
        field_line(
            "Title",
            form.title.value().to_string(),
            form.focus == TodoFormField::Title,
        ),
        field_line(
            "Description",
            form.description.value().to_string(),
            form.focus == TodoFormField::Description,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "enter save · tab fields · esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);

    let (row, field) = match form.focus {
        TodoFormField::Title => (0, &form.title),
        TodoFormField::Description => (1, &form.description),
    };
    let x = inner.x + FORM_LABEL_WIDTH + field.width_before_cursor();
    frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y + row));
}
