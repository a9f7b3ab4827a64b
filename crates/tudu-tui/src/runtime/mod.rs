//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes
//! them.
//!
//! ## Inbox Pattern
//!
//! Async results are collected through an "inbox" channel:
//! - `spawn_task` runs a handler on tokio and sends its result event
//!   to `inbox_tx`
//! - the runtime drains `inbox_rx` each frame
//!
//! Structure:
//! - `mod.rs`: core runtime (event loop, effect dispatch)
//! - `handlers.rs`: effect handler implementations (API calls)

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tudu_core::api::ApiClient;
use tudu_core::config::Config;
use tudu_core::session::SessionStore;

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is happening (60fps = ~16ms per frame).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle (no request in flight, no recent input).
/// Longer timeout reduces CPU usage when nothing is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the state, and the API client. Terminal state is
/// restored on drop and on panic.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: AppState,
    /// Shared API client for spawned request tasks.
    client: Arc<ApiClient>,
    /// Session persistence.
    store: SessionStore,
    /// Inbox sender - handlers send result events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during interaction).
    last_terminal_event: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// Loads the persisted session (before the terminal is taken over,
    /// so any I/O error prints normally) and picks the startup screen
    /// from it.
    pub fn new(config: &Config, store: SessionStore) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let persisted = store.load().context("load persisted session")?;
        let client = Arc::new(ApiClient::from_config(config));

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(persisted);

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        Ok(Self {
            terminal,
            state,
            client,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        // Kick off session restore + initial fetch when a token exists.
        let effects = update::startup_effects(&mut self.state);
        self.execute_effects(effects);

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick cadence
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the terminal and the inbox.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while requests are in flight or the user is
        // interacting; slow polling otherwise to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tasks.is_any_running() || recent_terminal_activity;

        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Calculate time until next tick for poll duration.
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until next tick is due
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Executes effects returned by the reducer.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler, delivering its result through the
    /// inbox wrapped in the task lifecycle envelope.
    fn spawn_task<F>(&self, kind: TaskKind, id: TaskId, fut: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = fut.await;
            let _ = tx.send(UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(result),
                },
            });
        });
    }

    /// Returns the session token, or completes the task with the given
    /// error event if there is none (the guard makes this unreachable
    /// in practice, but a stuck spinner would be worse than a message).
    fn require_token(&self, kind: TaskKind, id: TaskId, on_missing: UiEvent) -> Option<String> {
        if let Some(token) = self.state.session.token.clone() {
            return Some(token);
        }
        let _ = self.inbox_tx.send(UiEvent::TaskCompleted {
            kind,
            completed: TaskCompleted {
                id,
                result: Box::new(on_missing),
            },
        });
        None
    }

    /// Executes a single effect.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            // Session file I/O (synchronous, small)
            UiEffect::PersistSession { session } => {
                if let Err(e) = self.store.save(&session) {
                    tracing::warn!(error = %e, "failed to persist session");
                }
            }
            UiEffect::ClearSession => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to clear session");
                }
            }

            // API calls
            UiEffect::RestoreSession { task, token } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::Restore,
                    task,
                    handlers::restore_session(client, token),
                );
            }
            UiEffect::SubmitAuth {
                task,
                mode,
                email,
                password,
                name,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::Auth,
                    task,
                    handlers::authenticate(client, mode, email, password, name),
                );
            }
            UiEffect::FetchTodos { task } => {
                let Some(token) = self.require_token(
                    TaskKind::TodosFetch,
                    task,
                    UiEvent::TodosFetched(Err("Not authenticated".to_string())),
                ) else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::TodosFetch,
                    task,
                    handlers::fetch_todos(client, token),
                );
            }
            UiEffect::CreateTodo {
                task,
                title,
                description,
            } => {
                let Some(token) = self.require_token(
                    TaskKind::TodoCreate,
                    task,
                    UiEvent::TodoCreated(Err("Not authenticated".to_string())),
                ) else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::TodoCreate,
                    task,
                    handlers::create_todo(client, token, title, description),
                );
            }
            UiEffect::UpdateTodo {
                task,
                id,
                title,
                description,
                completed,
            } => {
                let Some(token) = self.require_token(
                    TaskKind::TodoUpdate,
                    task,
                    UiEvent::TodoUpdated(Err("Not authenticated".to_string())),
                ) else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::TodoUpdate,
                    task,
                    handlers::update_todo(client, token, id, title, description, completed),
                );
            }
            UiEffect::DeleteTodo { task, id } => {
                let Some(token) = self.require_token(
                    TaskKind::TodoDelete,
                    task,
                    UiEvent::TodoDeleted(Err("Not authenticated".to_string())),
                ) else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(
                    TaskKind::TodoDelete,
                    task,
                    handlers::delete_todo(client, token, id),
                );
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
