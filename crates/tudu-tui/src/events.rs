//! UI event types.
//!
//! Events enter the reducer from three sources: the terminal, the tick
//! timer, and the inbox channel that async task handlers send their
//! results to. Task results arrive wrapped in `TaskCompleted` so the
//! reducer can drop stale completions before unwrapping the payload.

use tudu_core::session::Session;
use tudu_core::types::{Todo, User};

use crate::common::{TaskCompleted, TaskKind};
use crate::features::auth::AuthMode;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Animation/render heartbeat.
    Tick,

    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// An async task finished; `completed.result` is the payload event.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted,
    },

    /// Outcome of validating a persisted token against `/auth/me`.
    SessionRestored(Result<User, String>),

    /// Outcome of a login or signup request.
    AuthFinished {
        mode: AuthMode,
        result: Result<Session, String>,
    },

    /// Outcome of fetching the todo list.
    TodosFetched(Result<Vec<Todo>, String>),

    /// Outcome of creating a todo.
    TodoCreated(Result<Todo, String>),

    /// Outcome of updating a todo (edit or completed-toggle).
    TodoUpdated(Result<Todo, String>),

    /// Outcome of deleting a todo; `Ok` carries the deleted id.
    TodoDeleted(Result<String, String>),
}
