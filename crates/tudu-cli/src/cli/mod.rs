//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use tudu_core::config;
use tudu_core::session::SessionStore;

mod commands;

#[derive(Parser)]
#[command(name = "tudu")]
#[command(version = "0.1")]
#[command(about = "Authentication-gated to-do list client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (or set TUDU_PASSWORD)
        #[arg(long, env = "TUDU_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and persist the session
    Signup {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (or set TUDU_PASSWORD)
        #[arg(long, env = "TUDU_PASSWORD", hide_env_values = true)]
        password: String,

        /// Display name (optional)
        #[arg(long)]
        name: Option<String>,
    },

    /// Log out (clear the persisted session)
    Logout,

    /// Show the current user, validating the persisted session
    Whoami,

    /// Manage todos
    Todos {
        #[command(subcommand)]
        command: TodoCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TodoCommands {
    /// List todos
    List,
    /// Add a todo
    Add {
        /// Todo title
        #[arg(value_name = "TITLE")]
        title: String,

        /// Longer description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Mark a todo as completed
    Done {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Mark a todo as not completed
    Undone {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Change a todo's title and/or description
    Edit {
        #[arg(value_name = "ID")]
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a todo
    Rm {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the API base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let home = config::paths::tudu_home();

    // Logs go to a file; the TUI owns the terminal.
    let _log_guard = tudu_core::logging::init(&home).context("init logging")?;

    let config = config::Config::load().context("load config")?;
    let store = SessionStore::new(&home);

    // default to the interactive client
    let Some(command) = cli.command else {
        return tudu_tui::run_interactive(&config, store).await;
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &store, &email, &password).await
        }
        Commands::Signup {
            email,
            password,
            name,
        } => commands::auth::signup(&config, &store, &email, &password, name.as_deref()).await,
        Commands::Logout => commands::auth::logout(&store),
        Commands::Whoami => commands::auth::whoami(&config, &store).await,

        Commands::Todos { command } => match command {
            TodoCommands::List => commands::todos::list(&config, &store).await,
            TodoCommands::Add { title, description } => {
                commands::todos::add(&config, &store, &title, &description).await
            }
            TodoCommands::Done { id } => {
                commands::todos::set_completed(&config, &store, &id, true).await
            }
            TodoCommands::Undone { id } => {
                commands::todos::set_completed(&config, &store, &id, false).await
            }
            TodoCommands::Edit {
                id,
                title,
                description,
            } => {
                commands::todos::edit(&config, &store, &id, title.as_deref(), description.as_deref())
                    .await
            }
            TodoCommands::Rm { id } => commands::todos::rm(&config, &store, &id).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
