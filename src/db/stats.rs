use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::Result;
use std::fs;

/// Summary of the event log shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    pub total_events: i64,
    pub first_event: Option<String>,
    pub last_event: Option<String>,
    pub distinct_members: i64,
}

pub fn load_stats(pool: &DbPool) -> Result<LogStats> {
    let total_events: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM rawdata", [], |row| row.get(0))?;

    // MIN/MAX yield a single NULL row on an empty table
    let (first_event, last_event): (Option<String>, Option<String>) = pool.conn.query_row(
        "SELECT MIN(dateEventLocal), MAX(dateEventLocal) FROM rawdata",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    let distinct_members: i64 = pool.conn.query_row(
        "SELECT COUNT(DISTINCT clientID) FROM rawdata WHERE clientID <> 0",
        [],
        |row| row.get(0),
    )?;

    Ok(LogStats {
        total_events,
        first_event,
        last_event,
        distinct_members,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> Result<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    let stats = load_stats(pool)?;

    println!(
        "{}• Total events:{} {}{}{}",
        CYAN, RESET, GREEN, stats.total_events, RESET
    );
    println!(
        "{}• Members seen:{} {}{}{}",
        CYAN, RESET, GREEN, stats.distinct_members, RESET
    );

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", stats.first_event.as_deref().unwrap_or(&dash));
    println!("    to:   {}", stats.last_event.as_deref().unwrap_or(&dash));

    println!();
    Ok(())
}
