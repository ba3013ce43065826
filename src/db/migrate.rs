//! Schema of the `rawdata` table as the logging webhook creates it.
//!
//! The reports never write to the table; `init` only makes sure an empty
//! local copy has the expected layout.

use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

pub const RAWDATA_COLUMNS: [&str; 9] = [
    "recNum",
    "dateEventLocal",
    "eventName",
    "coreID",
    "deviceFunction",
    "logEvent",
    "clientID",
    "firstName",
    "logData",
];

/// Check if the `rawdata` table exists.
pub fn rawdata_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='rawdata'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Columns of `rawdata` that the reports need but the table lacks.
pub fn missing_rawdata_columns(conn: &Connection) -> Result<Vec<&'static str>> {
    let mut stmt = conn.prepare("PRAGMA table_info('rawdata')")?;
    let cols = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>>>()?;

    Ok(RAWDATA_COLUMNS
        .iter()
        .copied()
        .filter(|c| !cols.iter().any(|have| have == c))
        .collect())
}

fn create_rawdata_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS rawdata (
            recNum          INTEGER PRIMARY KEY AUTOINCREMENT,
            dateEventLocal  TEXT NOT NULL,
            eventName       TEXT NOT NULL DEFAULT '',
            coreID          TEXT NOT NULL DEFAULT '',
            deviceFunction  TEXT NOT NULL DEFAULT '',
            logEvent        TEXT NOT NULL,
            clientID        INTEGER NOT NULL DEFAULT 0,
            firstName       TEXT NOT NULL DEFAULT '',
            logData         TEXT NOT NULL DEFAULT ''
        );
        "#,
    )
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_rawdata_event_date ON rawdata(logEvent, dateEventLocal);
        CREATE INDEX IF NOT EXISTS idx_rawdata_client ON rawdata(clientID);
        "#,
    )
}

/// Create the table and its indexes if missing. Existing rows are untouched.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    if !rawdata_table_exists(conn)? {
        create_rawdata_table(conn)?;
        success("Created rawdata table.");
    }
    ensure_indexes(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!rawdata_table_exists(&conn).unwrap());

        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        assert!(rawdata_table_exists(&conn).unwrap());
        assert!(missing_rawdata_columns(&conn).unwrap().is_empty());
    }

    #[test]
    fn reports_missing_columns_of_foreign_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE rawdata (recNum INTEGER, dateEventLocal TEXT, logEvent TEXT, clientID INTEGER);",
        )
        .unwrap();

        let missing = missing_rawdata_columns(&conn).unwrap();
        assert_eq!(
            missing,
            ["eventName", "coreID", "deviceFunction", "firstName", "logData"]
        );
    }
}
