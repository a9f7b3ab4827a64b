//! Feature modules: state + reducer + view per screen area.

pub mod auth;
pub mod todos;
