//! Dashboard: the to-do list and its create/edit form.

mod render;
mod state;
mod update;

pub use render::render;
pub use state::{TodoForm, TodoFormField, TodosState, append_todo, remove_todo, replace_todo};
pub use update::{TodosResult, handle_key, handle_result};
