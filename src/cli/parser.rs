use crate::export::{ExportFormat, ReportKind};
use crate::models::period::Granularity;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCheckin
/// Read-only attendance reports over the makerspace RFID check-in log
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance reports over the RFID check-in log (who is in, unique members per day/month, trailing-window counts)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Read the log from a CSV dump of the rawdata table instead of SQLite
    #[arg(global = true, long = "csv", value_name = "FILE", conflicts_with = "db")]
    pub csv: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and an empty rawdata table
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Inspect the event log database
    Db {
        #[arg(long = "check", help = "Check database integrity and rawdata layout")]
        check: bool,

        #[arg(long = "info", help = "Show event log statistics")]
        info: bool,
    },

    /// Members currently checked in
    Present {
        #[arg(long, value_name = "YYYY-MM-DD", help = "Reference date (default: today)")]
        date: Option<String>,

        #[arg(
            long = "equipment",
            short = 'e',
            value_name = "KIND",
            help = "Equipment access to flag, repeatable (default: from config)"
        )]
        equipment: Vec<String>,
    },

    /// Unique members per day or month
    Attendance {
        #[arg(long, value_enum, default_value = "month")]
        by: Granularity,

        #[arg(long, value_name = "YYYY-MM-DD", help = "First day counted (default: from config)")]
        since: Option<String>,
    },

    /// Unique members in a trailing window of days
    Unique {
        #[arg(long, help = "Window length in days (default: from config)")]
        days: Option<u32>,

        #[arg(
            long = "as-of",
            value_name = "DATETIME",
            help = "Window end, 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD' (default: now)"
        )]
        as_of: Option<String>,
    },

    /// Most recent events of any kind
    Recent {
        #[arg(long, short, help = "Number of events (default: from config)")]
        limit: Option<usize>,
    },

    /// Most recent events grouped by device
    Devices {
        #[arg(long, short, help = "Number of events (default: from config)")]
        limit: Option<usize>,
    },

    /// Export a report to a file
    Export {
        #[arg(long, value_enum)]
        report: ReportKind,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Reference date for `present`")]
        date: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "First day for attendance reports")]
        since: Option<String>,

        #[arg(long, help = "Window length for `unique`")]
        days: Option<u32>,

        #[arg(long = "as-of", value_name = "DATETIME", help = "Window end for `unique`")]
        as_of: Option<String>,

        #[arg(long, short, help = "Number of events for `recent` / `devices`")]
        limit: Option<usize>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
