//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O and task spawning only; the reducer
//! itself never touches the network or the filesystem.

use tudu_core::session::Session;

use crate::common::TaskId;
use crate::features::auth::AuthMode;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Validate the persisted token against `/auth/me`.
    RestoreSession { task: TaskId, token: String },

    /// Submit the login/signup form.
    SubmitAuth {
        task: TaskId,
        mode: AuthMode,
        email: String,
        password: String,
        name: Option<String>,
    },

    /// Fetch the todo list for the current session.
    FetchTodos { task: TaskId },

    /// Create a todo.
    CreateTodo {
        task: TaskId,
        title: String,
        description: String,
    },

    /// Update a todo (full PUT; toggling resends title/description).
    UpdateTodo {
        task: TaskId,
        id: String,
        title: String,
        description: String,
        completed: bool,
    },

    /// Delete a todo.
    DeleteTodo { task: TaskId, id: String },

    /// Write the session file.
    PersistSession { session: Session },

    /// Remove the session file.
    ClearSession,
}
