//! Auth feature reducer.
//!
//! Handles form input on the login/signup screens and the results of
//! auth requests.

use crossterm::event::{KeyCode, KeyEvent};
use tudu_core::session::Session;

use super::state::AuthMode;
use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::route::Screen;
use crate::state::AppState;

/// Handles a key press on an auth screen.
pub fn handle_key(app: &mut AppState, mode: AuthMode, key: KeyEvent) -> Vec<UiEffect> {
    // While a request is in flight, the form is frozen (no resubmission).
    if app.tasks.auth.is_running() {
        return vec![];
    }

    app.auth.ensure_focus(mode);

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            app.auth.cycle_focus(mode, false);
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth.cycle_focus(mode, true);
            vec![]
        }
        KeyCode::Enter => submit(app, mode),
        _ => {
            app.auth.focused_mut().handle_key(key);
            vec![]
        }
    }
}

/// Validates and submits the form.
fn submit(app: &mut AppState, mode: AuthMode) -> Vec<UiEffect> {
    let email = app.auth.email.value().trim().to_string();
    let password = app.auth.password.value().to_string();

    if email.is_empty() || password.is_empty() {
        app.auth.error = Some("Email and password are required".to_string());
        return vec![];
    }

    let name = match mode {
        AuthMode::Signup => {
            let name = app.auth.name.value().trim().to_string();
            (!name.is_empty()).then_some(name)
        }
        AuthMode::Login => None,
    };

    app.auth.error = None;
    let task = app.spawn(TaskKind::Auth);
    vec![UiEffect::SubmitAuth {
        task,
        mode,
        email,
        password,
        name,
    }]
}

/// Handles the result of a login/signup request.
///
/// On success the session is populated and persisted and navigation
/// goes to the dashboard (through the guard). On failure the session
/// stays empty and the error renders inline.
pub fn handle_result(
    app: &mut AppState,
    mode: AuthMode,
    result: Result<Session, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(session) => {
            tracing::info!(email = %session.user.email, "authenticated");
            app.session.user = Some(session.user.clone());
            app.session.token = Some(session.token.clone());
            app.auth.reset();

            let mut effects = vec![UiEffect::PersistSession { session }];
            effects.extend(crate::update::navigate(app, Screen::Dashboard));
            effects
        }
        Err(message) => {
            tracing::warn!(?mode, "authentication failed");
            app.auth.error = Some(message);
            app.auth.password.clear();
            vec![]
        }
    }
}
