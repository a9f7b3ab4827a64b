//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::{self, AuthMode};
use crate::features::todos::{self, TodosResult};
use crate::route::{self, Screen};
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskCompleted { kind, completed } => {
            // Stale completions (operation superseded or state reset)
            // are dropped without touching state.
            if app.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                tracing::debug!(?kind, "dropping stale task completion");
                vec![]
            }
        }
        UiEvent::SessionRestored(result) => handle_session_restored(app, result),
        UiEvent::AuthFinished { mode, result } => auth::handle_result(app, mode, result),
        UiEvent::TodosFetched(result) => todos::handle_result(app, TodosResult::Fetched(result)),
        UiEvent::TodoCreated(result) => todos::handle_result(app, TodosResult::Created(result)),
        UiEvent::TodoUpdated(result) => todos::handle_result(app, TodosResult::Updated(result)),
        UiEvent::TodoDeleted(result) => todos::handle_result(app, TodosResult::Deleted(result)),
    }
}

/// Effects to run right after the terminal is set up.
///
/// With a persisted token the client boots onto the dashboard and
/// validates the token and fetches the list concurrently, like the
/// original page did on mount.
pub fn startup_effects(app: &mut AppState) -> Vec<UiEffect> {
    let Some(token) = app.session.token.clone() else {
        return vec![];
    };

    let task = app.spawn(TaskKind::Restore);
    let mut effects = vec![UiEffect::RestoreSession { task, token }];
    effects.extend(fetch_todos(app));
    effects
}

/// Navigates to a screen, always through the guard.
pub(crate) fn navigate(app: &mut AppState, requested: Screen) -> Vec<UiEffect> {
    let target = route::guard(requested, app.session.has_token());
    if target == app.screen {
        return vec![];
    }
    app.screen = target;

    match target {
        Screen::Login | Screen::Signup => {
            app.auth.reset();
            vec![]
        }
        Screen::Dashboard => fetch_todos(app),
    }
}

/// Spawns a list fetch for the current session.
pub(crate) fn fetch_todos(app: &mut AppState) -> Vec<UiEffect> {
    let task = app.spawn(TaskKind::TodosFetch);
    vec![UiEffect::FetchTodos { task }]
}

/// Logout: drop the in-memory session, forget in-flight work, clear
/// the persisted file, and land on the login screen.
pub(crate) fn logout(app: &mut AppState) -> Vec<UiEffect> {
    app.session.clear();
    app.todos.reset();
    app.tasks = crate::common::Tasks::default();

    let mut effects = vec![UiEffect::ClearSession];
    effects.extend(navigate(app, Screen::Login));
    effects
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if let Some(effects) = handle_global_key(app, key) {
        return effects;
    }

    match app.screen {
        Screen::Login => auth::handle_key(app, AuthMode::Login, key),
        Screen::Signup => auth::handle_key(app, AuthMode::Signup, key),
        Screen::Dashboard => todos::handle_key(app, key),
    }
}

/// Keys handled regardless of which screen has focus.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(vec![UiEffect::Quit]),
        KeyCode::Char('s') if ctrl && app.screen.is_auth() => {
            let mode = AuthMode::from_screen(app.screen)?;
            Some(navigate(app, mode.toggled().screen()))
        }
        KeyCode::Char('l') if ctrl && app.screen == Screen::Dashboard => Some(logout(app)),
        _ => None,
    }
}

fn handle_session_restored(
    app: &mut AppState,
    result: Result<tudu_core::types::User, String>,
) -> Vec<UiEffect> {
    match result {
        Ok(user) => {
            tracing::info!(email = %user.email, "session restored");
            app.session.user = Some(user);
            vec![]
        }
        Err(message) => {
            // The API rejected the persisted token: back to anonymous.
            tracing::info!(%message, "persisted session rejected");
            app.session.clear();
            app.todos.reset();
            app.tasks = crate::common::Tasks::default();

            let mut effects = vec![UiEffect::ClearSession];
            effects.extend(navigate(app, Screen::Login));
            effects
        }
    }
}

#[cfg(test)]
mod tests {
    use tudu_core::session::Session;
    use tudu_core::types::{Todo, User};

    use super::*;
    use crate::common::TaskCompleted;

    fn user() -> User {
        User {
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
        }
    }

    fn session() -> Session {
        Session::new(user(), "tok-1234567890-abcdef".into())
    }

    fn todo(id: &str, completed: bool) -> Todo {
        Todo {
            id: id.into(),
            title: format!("todo {id}"),
            description: String::new(),
            completed,
        }
    }

    #[test]
    fn login_success_populates_session_and_persists() {
        let mut app = AppState::new(None);
        assert_eq!(app.screen, Screen::Login);

        let effects = update(
            &mut app,
            UiEvent::AuthFinished {
                mode: AuthMode::Login,
                result: Ok(session()),
            },
        );

        assert!(app.session.has_token());
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(matches!(effects[0], UiEffect::PersistSession { .. }));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchTodos { .. }))
        );
    }

    #[test]
    fn login_failure_sets_error_and_stays_anonymous() {
        let mut app = AppState::new(None);

        let effects = update(
            &mut app,
            UiEvent::AuthFinished {
                mode: AuthMode::Login,
                result: Err("Invalid credentials".into()),
            },
        );

        assert!(effects.is_empty());
        assert!(!app.session.has_token());
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.auth.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn rejected_restore_clears_session_and_redirects() {
        let mut app = AppState::new(Some(session()));
        assert_eq!(app.screen, Screen::Dashboard);

        let effects = update(&mut app, UiEvent::SessionRestored(Err("Unauthorized".into())));

        assert!(!app.session.has_token());
        assert_eq!(app.screen, Screen::Login);
        assert!(effects.iter().any(|e| matches!(e, UiEffect::ClearSession)));
    }

    #[test]
    fn successful_restore_refreshes_the_user() {
        let mut app = AppState::new(Some(session()));
        app.session.user = None;

        update(&mut app, UiEvent::SessionRestored(Ok(user())));

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(
            app.session.user.as_ref().map(|u| u.email.as_str()),
            Some("ada@example.com")
        );
    }

    #[test]
    fn created_todo_is_appended() {
        let mut app = AppState::new(Some(session()));
        app.todos.items = vec![todo("a", false)];

        update(&mut app, UiEvent::TodoCreated(Ok(todo("b", false))));

        assert_eq!(app.todos.items.len(), 2);
        assert_eq!(app.todos.items[1].id, "b");
    }

    #[test]
    fn updated_todo_replaces_only_its_entry() {
        let mut app = AppState::new(Some(session()));
        app.todos.items = vec![todo("a", false), todo("b", false)];

        update(&mut app, UiEvent::TodoUpdated(Ok(todo("a", true))));

        assert!(app.todos.items[0].completed);
        assert!(!app.todos.items[1].completed);
    }

    #[test]
    fn deleted_todo_is_removed() {
        let mut app = AppState::new(Some(session()));
        app.todos.items = vec![todo("a", false), todo("b", false)];
        app.todos.selected = 1;

        update(&mut app, UiEvent::TodoDeleted(Ok("b".into())));

        assert_eq!(app.todos.items.len(), 1);
        assert_eq!(app.todos.items[0].id, "a");
        assert_eq!(app.todos.selected, 0);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = AppState::new(Some(session()));
        app.todos.items = vec![todo("a", false)];

        // A fetch is spawned, then superseded by logout before it lands.
        let stale_id = app.spawn(TaskKind::TodosFetch);
        logout(&mut app);

        let effects = update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::TodosFetch,
                completed: TaskCompleted {
                    id: stale_id,
                    result: Box::new(UiEvent::TodosFetched(Ok(vec![todo("ghost", false)]))),
                },
            },
        );

        assert!(effects.is_empty());
        assert!(app.todos.items.is_empty());
    }

    #[test]
    fn startup_with_token_restores_and_fetches() {
        let mut app = AppState::new(Some(session()));
        let effects = startup_effects(&mut app);

        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::RestoreSession { .. }))
        );
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchTodos { .. }))
        );
    }

    #[test]
    fn startup_without_token_is_quiet() {
        let mut app = AppState::new(None);
        assert!(startup_effects(&mut app).is_empty());
    }
}
