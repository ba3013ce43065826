//! rCheckin library root.
//! Exposes the CLI parser, the high-level run() function and the attendance
//! query engine (`core::engine`) with its event sources.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::source::{EventSource, MemoryLog};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr, filtered by `RCHECKIN_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("RCHECKIN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

/// Opens the event log the report commands read from: the CSV dump given
/// with `--csv`, otherwise the configured SQLite file (read-only).
pub fn open_source(cli: &Cli, cfg: &Config) -> AppResult<Box<dyn EventSource>> {
    if let Some(csv_path) = &cli.csv {
        tracing::debug!(path = %csv_path, "reading event log from CSV dump");
        return Ok(Box::new(MemoryLog::from_csv_path(Path::new(csv_path))?));
    }

    let db_path = cfg.database_path();
    tracing::debug!(path = %db_path.display(), "opening event log");
    Ok(Box::new(DbPool::open_read_only(&db_path.to_string_lossy())?))
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Present { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::present::handle(&cli.command, cfg, source.as_ref())
        }
        Commands::Attendance { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::attendance::handle(&cli.command, cfg, source.as_ref())
        }
        Commands::Unique { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::unique::handle(&cli.command, cfg, source.as_ref())
        }
        Commands::Recent { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::recent::handle(&cli.command, cfg, source.as_ref())
        }
        Commands::Devices { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::devices::handle(&cli.command, cfg, source.as_ref())
        }
        Commands::Export { .. } => {
            let source = open_source(cli, cfg)?;
            cli::commands::export::handle(&cli.command, cfg, source.as_ref())
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    init_tracing();

    let cli = Cli::parse();

    // config is loaded once and shared by every command
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
