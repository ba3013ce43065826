use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::migrate::ensure_schema;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite file with an empty `rawdata` table
///
/// No events are written; the table is filled by the logging webhook.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.clone(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rCheckin…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", db_str);

    let pool = DbPool::open_read_write(&db_str)?;
    ensure_schema(&pool.conn)?;

    tracing::info!(path = %db_str, "database initialized");
    success(format!("Database initialized at {db_str}"));
    Ok(())
}
