//! SQLite connection wrapper (one connection per CLI invocation).

use rusqlite::{Connection, OpenFlags, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open the event log for reporting. The file must already exist and is
    /// never written through this handle.
    pub fn open_read_only(path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(
            Path::new(path),
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!(path, "opened event log read-only");
        Ok(Self { conn })
    }

    /// Open (or create) the database read-write. Only `init` does this.
    pub fn open_read_write(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }
}
