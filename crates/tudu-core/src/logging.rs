//! Logging initialization.
//!
//! The TUI owns the terminal, so logs go to a daily-rolling file under
//! `$TUDU_HOME/logs/` instead of stderr. Filtering is controlled by the
//! `TUDU_LOG` environment variable (default `info`).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Returns a guard that must be kept alive for the lifetime of the
/// process; dropping it stops the background log writer.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init(home: &Path) -> Result<WorkerGuard> {
    let logs_dir = home.join("logs");
    fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "tudu.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("TUDU_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: tests may install their own subscriber first.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
