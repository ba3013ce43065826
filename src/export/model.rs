// src/export/model.rs

use crate::core::calculator::devices::DeviceSection;
use crate::db::migrate::RAWDATA_COLUMNS;
use crate::models::event::Event;
use crate::models::period::PeriodCount;
use crate::models::presence::PresentMember;
use crate::utils::date::{DATE_FORMAT, format_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::io::Write;

/// Flat row of the presence report. Granted kinds are joined with `;`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PresenceRow {
    pub date: String,
    pub client_id: i64,
    pub first_name: String,
    pub checked_in_at: String,
    pub equipment: String,
}

impl PresenceRow {
    pub fn from_member(date: NaiveDate, m: &PresentMember) -> Self {
        let granted: Vec<&str> = m
            .equipment
            .iter()
            .filter(|(_, allowed)| **allowed)
            .map(|(kind, _)| kind.as_str())
            .collect();

        Self {
            date: date.format(DATE_FORMAT).to_string(),
            client_id: m.client_id,
            first_name: m.first_name.clone(),
            checked_in_at: format_timestamp(&m.checked_in_at),
            equipment: granted.join(";"),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PeriodRow {
    pub period: String,
    pub year: i32,
    pub month: u32,
    pub day: Option<u32>,
    pub unique_members: usize,
}

impl From<&PeriodCount> for PeriodRow {
    fn from(pc: &PeriodCount) -> Self {
        Self {
            period: pc.period.to_string(),
            year: pc.period.year,
            month: pc.period.month,
            day: pc.period.day,
            unique_members: pc.count,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UniqueRow {
    pub window_start: String,
    pub as_of: String,
    pub window_days: u32,
    pub unique_members: usize,
}

impl UniqueRow {
    pub fn new(
        window_start: NaiveDate,
        as_of: NaiveDateTime,
        window_days: u32,
        count: usize,
    ) -> Self {
        Self {
            window_start: window_start.format(DATE_FORMAT).to_string(),
            as_of: format_timestamp(&as_of),
            window_days,
            unique_members: count,
        }
    }
}

/// A report ready to be written in any export format.
#[derive(Debug, Clone)]
pub enum Report {
    Presence(Vec<PresenceRow>),
    Periods(Vec<PeriodRow>),
    Unique(UniqueRow),
    Events(Vec<Event>),
    Devices(Vec<DeviceSection>),
}

fn event_to_row(e: &Event) -> Vec<String> {
    vec![
        e.record_number.to_string(),
        e.timestamp_str(),
        e.category.clone(),
        e.device_id.clone(),
        e.device_function.clone(),
        e.log_event.to_db_string(),
        e.client_id.to_string(),
        e.first_name.clone(),
        e.log_data.clone(),
    ]
}

impl Report {
    /// A count is a value even when it is zero, so `Unique` is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Report::Presence(rows) => rows.is_empty(),
            Report::Periods(rows) => rows.is_empty(),
            Report::Unique(_) => false,
            Report::Events(rows) => rows.is_empty(),
            Report::Devices(sections) => sections.is_empty(),
        }
    }

    /// Header for CSV / XLSX; matches the serde field names.
    pub fn headers(&self) -> Vec<&'static str> {
        match self {
            Report::Presence(_) => vec![
                "date",
                "client_id",
                "first_name",
                "checked_in_at",
                "equipment",
            ],
            Report::Periods(_) => vec!["period", "year", "month", "day", "unique_members"],
            Report::Unique(_) => vec!["window_start", "as_of", "window_days", "unique_members"],
            Report::Events(_) | Report::Devices(_) => RAWDATA_COLUMNS.to_vec(),
        }
    }

    /// Every row as plain strings (for XLSX).
    pub fn rows(&self) -> Vec<Vec<String>> {
        match self {
            Report::Presence(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.date.clone(),
                        r.client_id.to_string(),
                        r.first_name.clone(),
                        r.checked_in_at.clone(),
                        r.equipment.clone(),
                    ]
                })
                .collect(),
            Report::Periods(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        r.period.clone(),
                        r.year.to_string(),
                        r.month.to_string(),
                        r.day.map(|d| d.to_string()).unwrap_or_default(),
                        r.unique_members.to_string(),
                    ]
                })
                .collect(),
            Report::Unique(r) => vec![vec![
                r.window_start.clone(),
                r.as_of.clone(),
                r.window_days.to_string(),
                r.unique_members.to_string(),
            ]],
            Report::Events(events) => events.iter().map(event_to_row).collect(),
            Report::Devices(sections) => sections
                .iter()
                .flat_map(|s| s.events.iter().map(event_to_row))
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        match self {
            Report::Presence(rows) => serde_json::to_string_pretty(rows),
            Report::Periods(rows) => serde_json::to_string_pretty(rows),
            Report::Unique(row) => serde_json::to_string_pretty(row),
            Report::Events(rows) => serde_json::to_string_pretty(rows),
            Report::Devices(sections) => serde_json::to_string_pretty(sections),
        }
    }

    /// CSV via serde; devices are flattened in section order.
    pub fn write_csv<W: Write>(&self, wtr: &mut csv::Writer<W>) -> csv::Result<()> {
        match self {
            Report::Presence(rows) => rows.iter().try_for_each(|r| wtr.serialize(r)),
            Report::Periods(rows) => rows.iter().try_for_each(|r| wtr.serialize(r)),
            Report::Unique(row) => wtr.serialize(row),
            Report::Events(rows) => rows.iter().try_for_each(|r| wtr.serialize(r)),
            Report::Devices(sections) => sections
                .iter()
                .flat_map(|s| s.events.iter())
                .try_for_each(|r| wtr.serialize(r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::log_event::LogEvent;
    use crate::utils::date::parse_timestamp;
    use std::collections::BTreeMap;

    #[test]
    fn presence_row_lists_granted_kinds_only() {
        let mut equipment = BTreeMap::new();
        equipment.insert("Laser".to_string(), false);
        equipment.insert("Woodshop".to_string(), true);
        let m = PresentMember {
            client_id: 12,
            first_name: "Ada".into(),
            checked_in_at: parse_timestamp("2020-03-14 09:00:00").unwrap(),
            record_number: 4,
            equipment,
        };
        let row = PresenceRow::from_member(m.checked_in_at.date(), &m);
        assert_eq!(row.equipment, "Woodshop");
        assert_eq!(row.checked_in_at, "2020-03-14 09:00:00");
    }

    #[test]
    fn event_csv_uses_table_column_names() {
        let mut ev = Event::new(
            3,
            parse_timestamp("2020-03-14 09:00:00").unwrap(),
            LogEvent::CheckedIn,
            12,
            "Ada",
        )
        .with_device("core-1", "Check In");
        ev.category = "RFIDLogging".into();
        let report = Report::Events(vec![ev]);

        let mut wtr = csv::Writer::from_writer(Vec::new());
        report.write_csv(&mut wtr).unwrap();
        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(report.headers().join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("3,2020-03-14 09:00:00,RFIDLogging,core-1,Check In,Checked In,12,Ada,")
        );
        assert_eq!(lines.next(), None);
        assert_eq!(report.rows()[0][2], "RFIDLogging");
        assert_eq!(report.rows()[0][3], "core-1");
    }

    #[test]
    fn zero_count_is_not_empty() {
        let as_of = parse_timestamp("2020-03-14 09:00:00").unwrap();
        let report = Report::Unique(UniqueRow::new(as_of.date(), as_of, 90, 0));
        assert!(!report.is_empty());
        assert_eq!(report.rows()[0][3], "0");
    }
}
