//! Annocat: an interactive catalog for Pascal VOC annotation records.
//!
//! Annocat loads VOC XML annotation files from a folder into an in-memory
//! catalog, keeps running statistics over everything it has read, and
//! answers searches by category or by image dimensions and object flags.
//!
//! # Modules
//!
//! - [`record`]: Record and detection types, and the VOC XML reader
//! - [`stats`]: Running statistics over every constructed record
//! - [`catalog`]: Insert-once, order-preserving record store
//! - [`query`]: Category and dimension/flag searches
//! - [`loader`]: Folder listing and file loading
//! - [`session`]: Catalog + statistics + options for one session
//! - [`menu`]: The interactive text menu
//! - [`error`]: Error types for annocat operations

pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod menu;
pub mod query;
pub mod record;
pub mod session;
pub mod stats;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use config::{OutputFormat, SessionConfig, StatsPolicy};
pub use error::AnnocatError;
pub use session::Session;

/// The annocat CLI application.
#[derive(Parser)]
#[command(name = "annocat")]
#[command(version, author, about)]
struct Cli {
    /// Folder containing the VOC XML annotation files.
    folder: Option<PathBuf>,

    /// When records count towards statistics ('every-attempt' or 'accepted-only').
    #[arg(long, env = "ANNOCAT_STATS_POLICY", default_value = "every-attempt")]
    stats_policy: String,

    /// Output format for records, search results and statistics ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Append log events to this file instead of stderr.
    #[arg(long, env = "ANNOCAT_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Run the annocat CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), AnnocatError> {
    let cli = Cli::parse();

    let stats_policy: StatsPolicy = cli.stats_policy.parse()?;
    let output: OutputFormat = cli.output.parse()?;

    init_logging(cli.log_file.as_ref())?;

    let Some(folder) = cli.folder else {
        println!("Please provide the folder path.");
        println!();
        println!("Run 'annocat --help' for usage information.");
        return Err(AnnocatError::invalid_input(
            "arguments",
            "missing <FOLDER> argument",
        ));
    };

    let folder = loader::resolve_dir(&folder)?;
    info!(folder = %folder.display(), %stats_policy, "starting session");

    let config = SessionConfig::new(folder)
        .with_stats_policy(stats_policy)
        .with_output(output);
    let mut session = Session::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Menu::new(&mut session, stdin.lock(), stdout.lock()).run()
}

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`.
fn init_logging(log_file: Option<&PathBuf>) -> Result<(), AnnocatError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
