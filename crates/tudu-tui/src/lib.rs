//! Full-screen TUI for tudu.
//!
//! Elm-style architecture, split the same way throughout:
//! - `state` holds all mutable UI state
//! - `update` is the pure reducer: state + event -> effects
//! - `effects` enumerates the commands the reducer may request
//! - `runtime` owns the terminal, executes effects, and feeds async
//!   results back in through an inbox channel

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod route;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use tudu_core::config::Config;
use tudu_core::session::SessionStore;

/// Runs the interactive to-do client.
pub async fn run_interactive(config: &Config, store: SessionStore) -> Result<()> {
    // The TUI needs a terminal to render to
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `tudu todos list` and friends for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config, store)?;
    runtime.run()?;

    Ok(())
}
