use crate::core::source::{EventFilter, EventSource};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::log_event::LogEvent;
use crate::utils::date::{DATE_FORMAT, format_timestamp, parse_timestamp};
use rusqlite::{Connection, Result, Row, params_from_iter};

const SELECT_EVENTS: &str = "SELECT recNum, dateEventLocal, eventName, coreID, deviceFunction,
                logEvent, clientID, firstName, logData
         FROM rawdata";

/// Load the rows matching `filter`, ascending by `recNum`.
///
/// Only filtering happens in SQL; grouping and counting are done in-process so
/// the same code runs over a `MemoryLog`.
pub fn load_events(conn: &Connection, filter: &EventFilter) -> AppResult<Vec<Event>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(from) = filter.from {
        clauses.push("date(dateEventLocal) >= ?".into());
        params.push(from.format(DATE_FORMAT).to_string());
    }
    if let Some(to) = filter.to {
        clauses.push("date(dateEventLocal) <= ?".into());
        params.push(to.format(DATE_FORMAT).to_string());
    }
    if let Some(until) = filter.until {
        clauses.push("datetime(dateEventLocal) <= datetime(?)".into());
        params.push(format_timestamp(&until));
    }
    if !filter.log_events.is_empty() {
        // one placeholder per event name: ?, ?, ?, ...
        let placeholders = vec!["?"; filter.log_events.len()].join(",");
        clauses.push(format!("logEvent IN ({placeholders})"));
        params.extend(filter.log_events.iter().map(LogEvent::to_db_string));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql = format!("{SELECT_EVENTS}{where_sql} ORDER BY recNum ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(params.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    tracing::trace!(%sql, rows = out.len(), "loaded events");
    Ok(out)
}

/// The `limit` most recent rows, descending by `recNum`.
pub fn load_latest(conn: &Connection, limit: usize) -> AppResult<Vec<Event>> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let mut stmt = conn.prepare(&format!("{SELECT_EVENTS} ORDER BY recNum DESC LIMIT ?1"))?;
    let rows = stmt.query_map([limit], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn map_row(row: &Row) -> Result<Event> {
    let ts_str: String = row.get("dateEventLocal")?;
    let timestamp = parse_timestamp(&ts_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDateTime(ts_str.clone())),
        )
    })?;

    let log_event: String = row.get("logEvent")?;

    Ok(Event {
        record_number: row.get("recNum")?,
        timestamp,
        device_id: text_or_empty(row, "coreID")?,
        category: text_or_empty(row, "eventName")?,
        device_function: text_or_empty(row, "deviceFunction")?,
        log_event: LogEvent::from_db_str(&log_event),
        client_id: row.get::<_, Option<i64>>("clientID")?.unwrap_or(0),
        first_name: text_or_empty(row, "firstName")?,
        log_data: text_or_empty(row, "logData")?,
    })
}

fn text_or_empty(row: &Row, col: &str) -> Result<String> {
    Ok(row.get::<_, Option<String>>(col)?.unwrap_or_default())
}

impl EventSource for DbPool {
    fn events(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        load_events(&self.conn, filter)
    }

    fn latest(&self, limit: usize) -> AppResult<Vec<Event>> {
        load_latest(&self.conn, limit)
    }
}
