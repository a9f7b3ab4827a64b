//! Application state composition.
//!
//! One `AppState` holds everything the reducer may touch:
//!
//! ```text
//! AppState
//! ├── screen: Screen            (current screen, guard-approved)
//! ├── session: SessionState     (user + token, in-memory copy)
//! ├── auth: AuthState           (login/signup form)
//! ├── todos: TodosState         (list cache + form)
//! ├── tasks: Tasks              (active async operations)
//! └── task_seq: TaskSeq         (task id generator)
//! ```
//!
//! The reducer mutates this; the runtime only reads it (for rendering
//! and for effect execution context).

use tudu_core::session::Session;
use tudu_core::types::User;

use crate::common::{TaskId, TaskKind, TaskSeq, TaskStarted, Tasks};
use crate::features::auth::AuthState;
use crate::features::todos::TodosState;
use crate::route::{self, Screen};

/// In-memory session state: the client-side mirror of the persisted
/// session. `token` presence is what the route guard keys on.
#[derive(Debug, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl SessionState {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Drops the in-memory session (logout, rejected restore).
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }
}

impl From<Option<Session>> for SessionState {
    fn from(persisted: Option<Session>) -> Self {
        match persisted {
            Some(session) => Self {
                user: Some(session.user),
                token: Some(session.token),
            },
            None => Self::default(),
        }
    }
}

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current screen; only ever set through the route guard.
    pub screen: Screen,
    /// In-memory session.
    pub session: SessionState,
    /// Login/signup form state.
    pub auth: AuthState,
    /// Dashboard state.
    pub todos: TodosState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    /// Creates the state, choosing the startup screen by token
    /// presence: the home screen is the dashboard, and the guard
    /// redirects to login when there is no token.
    pub fn new(persisted: Option<Session>) -> Self {
        let session = SessionState::from(persisted);
        let screen = route::guard(Screen::Dashboard, session.has_token());

        Self {
            should_quit: false,
            screen,
            session,
            auth: AuthState::new(),
            todos: TodosState::new(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
        }
    }

    /// Allocates a task id and marks the operation active, so a later
    /// completion with a different id is recognized as stale.
    pub fn spawn(&mut self, kind: TaskKind) -> TaskId {
        let id = self.task_seq.next_id();
        self.tasks.state_mut(kind).on_started(&TaskStarted { id });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            User {
                email: "ada@example.com".into(),
                name: None,
            },
            "tok-1234567890-abcdef".into(),
        )
    }

    #[test]
    fn starts_on_login_without_a_token() {
        let app = AppState::new(None);
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.has_token());
    }

    #[test]
    fn starts_on_dashboard_with_a_token() {
        let app = AppState::new(Some(session()));
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.session.has_token());
    }
}
