//! Where events come from.
//!
//! The aggregations only need two reads: a filtered scan and the most recent
//! rows. `DbPool` answers them with SQL (see `db::queries`); `MemoryLog`
//! answers them over a vector, e.g. a CSV dump of the `rawdata` table.

use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::log_event::LogEvent;
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Row filter. Every bound is inclusive; `None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Ignore rows stamped after this moment.
    pub until: Option<NaiveDateTime>,
    /// Empty means every `logEvent` value.
    pub log_events: Vec<LogEvent>,
}

impl EventFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    pub fn since(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            ..Self::default()
        }
    }

    pub fn until(mut self, ts: NaiveDateTime) -> Self {
        self.until = Some(ts);
        self
    }

    pub fn with_events<I: IntoIterator<Item = LogEvent>>(mut self, events: I) -> Self {
        self.log_events.extend(events);
        self
    }

    pub fn matches(&self, ev: &Event) -> bool {
        let date = ev.date();
        self.from.is_none_or(|f| date >= f)
            && self.to.is_none_or(|t| date <= t)
            && self.until.is_none_or(|u| ev.timestamp <= u)
            && (self.log_events.is_empty() || self.log_events.contains(&ev.log_event))
    }
}

/// Read access to the append-only event log.
pub trait EventSource {
    /// Rows matching `filter`, ascending by record number.
    fn events(&self, filter: &EventFilter) -> AppResult<Vec<Event>>;

    /// The `limit` most recent rows, descending by record number.
    fn latest(&self, limit: usize) -> AppResult<Vec<Event>>;
}

/// In-process log.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    events: Vec<Event>,
}

impl MemoryLog {
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.record_number);
        Self { events }
    }

    /// Load a CSV dump of `rawdata` (header row with the table's column names).
    pub fn from_csv_path(path: &Path) -> AppResult<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_csv_reader<R: Read>(input: R) -> AppResult<Self> {
        Self::from_csv(csv::Reader::from_reader(input))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Self> {
        let mut events = Vec::new();
        for row in reader.deserialize::<Event>() {
            events.push(row?);
        }
        tracing::debug!(rows = events.len(), "loaded event log from CSV");
        Ok(Self::new(events))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for MemoryLog {
    fn events(&self, filter: &EventFilter) -> AppResult<Vec<Event>> {
        Ok(self
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    fn latest(&self, limit: usize) -> AppResult<Vec<Event>> {
        Ok(self.events.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        crate::utils::date::parse_timestamp(s).unwrap()
    }

    #[test]
    fn csv_dump_loads_in_record_order() {
        let dump = "\
recNum,dateEventLocal,eventName,coreID,deviceFunction,logEvent,clientID,firstName,logData
7,2020-03-14 10:00:00,RFIDLogging,dev-a,Check In,Checked Out,42,Ada,
3,2020-03-14 09:00:00,RFIDLogging,dev-a,Check In,Checked In,42,Ada,
5,2020-03-14 09:30:00,RFIDLogging,dev-b,Woodshop,reboot,,,power cycle
";
        let log = MemoryLog::from_csv_reader(dump.as_bytes()).unwrap();
        assert_eq!(log.len(), 3);

        let all = log.events(&EventFilter::default()).unwrap();
        let recs: Vec<i64> = all.iter().map(|e| e.record_number).collect();
        assert_eq!(recs, [3, 5, 7]);
        assert_eq!(all[1].client_id, 0);
        assert_eq!(all[1].log_event, LogEvent::Other("reboot".into()));
        assert_eq!(all[1].log_data, "power cycle");
    }

    #[test]
    fn bad_csv_row_is_reported_as_unavailable() {
        let dump = "\
recNum,dateEventLocal,eventName,coreID,deviceFunction,logEvent,clientID,firstName,logData
1,yesterday,RFIDLogging,dev-a,Check In,Checked In,42,Ada,
";
        let err = MemoryLog::from_csv_reader(dump.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::AppError::DataUnavailable(_)
        ));
    }

    #[test]
    fn filter_bounds_are_inclusive() {
        let day = ts("2020-03-14 00:00:00").date();
        let log = MemoryLog::new(vec![
            Event::new(1, ts("2020-03-13 23:59:59"), LogEvent::CheckedIn, 1, "A"),
            Event::new(2, ts("2020-03-14 00:00:00"), LogEvent::CheckedIn, 2, "B"),
            Event::new(3, ts("2020-03-14 23:59:59"), LogEvent::CheckedOut, 2, "B"),
            Event::new(4, ts("2020-03-15 00:00:00"), LogEvent::CheckedIn, 3, "C"),
        ]);

        let on_day = log.events(&EventFilter::on(day)).unwrap();
        assert_eq!(on_day.len(), 2);

        let only_in = log
            .events(&EventFilter::on(day).with_events([LogEvent::CheckedIn]))
            .unwrap();
        assert_eq!(only_in.len(), 1);

        let cut = log
            .events(&EventFilter::on(day).until(ts("2020-03-14 12:00:00")))
            .unwrap();
        assert_eq!(cut.len(), 1);
    }

    #[test]
    fn latest_returns_newest_first() {
        let log = MemoryLog::new(
            (1..=5)
                .map(|n| Event::new(n, ts("2020-03-14 09:00:00"), LogEvent::CheckedIn, n, "X"))
                .collect(),
        );
        let recs: Vec<i64> = log
            .latest(3)
            .unwrap()
            .iter()
            .map(|e| e.record_number)
            .collect();
        assert_eq!(recs, [5, 4, 3]);
        assert_eq!(log.latest(50).unwrap().len(), 5);
    }
}
