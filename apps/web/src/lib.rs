//! # Stockroom Web Library
//!
//! Controller and renderer for the Stockroom inventory page.
//!
//! ## Module Organization
//! ```text
//! stockroom_web/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── InventoryApp: owned page state
//! │   └── config.rs   ◄─── AppConfig: defaults → TOML → env
//! ├── events.rs       ◄─── data-action → command routing
//! ├── console.rs      ◄─── Terminal session driving events
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Form submit, edit, delete
//! │   ├── category.rs ◄─── Rename, delete
//! │   ├── modal.rs    ◄─── Panels and backdrop
//! │   └── session.rs  ◄─── Logout
//! ├── render/         ◄─── HTML from view models
//! ├── dialog.rs       ◄─── alert / confirm / prompt seam
//! └── error.rs        ◄─── AppError for commands
//! ```
//!
//! ## Event Handling Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  page event ──► command(&mut InventoryApp, &mut dyn Dialogs, ..)       │
//! │                     │                                                   │
//! │                     ├── stockroom-core decides                          │
//! │                     ├── stockroom-db persists (awaited)                 │
//! │                     ▼                                                   │
//! │                 Result<T, AppError> ──► caller re-renders              │
//! │                                                                         │
//! │  One `&mut` borrow at a time: handlers never interleave.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod dialog;
pub mod error;
pub mod events;
pub mod render;
pub mod state;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use stockroom_db::{Database, DbConfig};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::dialog::TerminalDialogs;

pub use error::{AppError, AppResult, ErrorCode};
pub use state::{AppConfig, InventoryApp, PageSnapshot};

/// Command-line options of the `stockroom-web` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    /// Explicit config file.
    pub config_path: Option<PathBuf>,
    /// Print the page snapshot as JSON instead of HTML.
    pub json: bool,
    /// Read page events from stdin instead of printing once.
    pub interactive: bool,
    /// Page query string, e.g. `?role=guest`.
    pub query: String,
    /// Print usage and exit.
    pub help: bool,
}

/// Rejected command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unrecognized option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

impl CliArgs {
    /// Parses arguments (without the program name).
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut query = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or(CliError::MissingValue(arg))?;
                    parsed.config_path = Some(PathBuf::from(path));
                }
                "--json" | "-j" => parsed.json = true,
                "--interactive" | "-i" => parsed.interactive = true,
                "--help" | "-h" => parsed.help = true,
                option if option.starts_with('-') => {
                    return Err(CliError::UnknownOption(arg));
                }
                _ if query.is_some() => return Err(CliError::UnexpectedArgument(arg)),
                _ => query = Some(arg),
            }
        }

        parsed.query = query.unwrap_or_default();
        Ok(parsed)
    }
}

pub const USAGE: &str = "Stockroom inventory page

Usage: stockroom-web [OPTIONS] [QUERY]

Arguments:
  [QUERY]              Page query string (e.g. \"?role=guest\")

Options:
  -c, --config <PATH>  Config file (default: $STOCKROOM_CONFIG or platform config dir)
  -j, --json           Print the page state as JSON instead of HTML
  -i, --interactive    Read page events from stdin (type `help` once started)
  -h, --help           Show this help message";

/// Parses the command line, printing usage on mistakes.
pub async fn run_from_args<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    match CliArgs::parse(args) {
        Ok(args) => run(args).await,
        Err(err) => {
            eprintln!("error: {}\n\n{}", err, USAGE);
            ExitCode::from(2)
        }
    }
}

/// Boots the page and prints it.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load configuration (defaults → stockroom.toml → STOCKROOM_*)       │
/// │  2. Initialize logging (RUST_LOG, else the configured filter)          │
/// │  3. Resolve the database path and connect (WAL, migrations)            │
/// │  4. InventoryApp::start: load inventory, evaluate the access gate      │
/// │  5. Print the rendered page (or its JSON snapshot), or run the console │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: CliArgs) -> ExitCode {
    if args.help {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match boot(args).await {
        Ok(output) => {
            if let Some(output) = output {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn boot(args: CliArgs) -> AppResult<Option<String>> {
    let config = AppConfig::load(args.config_path)?;
    init_tracing(&config.log_filter);

    info!("Starting Stockroom");

    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    if !db.health_check().await {
        return Err(AppError::new(ErrorCode::DatabaseError, "Database is not answering queries"));
    }

    let mut app = InventoryApp::start(db.clone(), config, &args.query).await?;

    let output = if args.interactive {
        let stdin = io::stdin();
        let mut terminal = TerminalDialogs::new(stdin.lock(), io::stdout());
        console::run_console(&mut app, &mut terminal).await?;
        None
    } else if args.json {
        let json = serde_json::to_string_pretty(&app.snapshot())
            .map_err(|e| AppError::internal(e.to_string()))?;
        Some(json)
    } else {
        Some(render::render_page(&app))
    };

    db.close().await;
    Ok(output)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom=trace` - Trace for stockroom crates only
/// - Otherwise the configured `log_filter`
///
/// Logs go to stderr so the printed page stays clean. Safe to call twice.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
