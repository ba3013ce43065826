use super::log_event::LogEvent;
use crate::utils::date::{TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One row of the `rawdata` table. Serde names follow the table columns so a
/// CSV dump of the table deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "recNum")]
    pub record_number: i64, // ⇔ rawdata.recNum, arrival order
    #[serde(
        rename = "dateEventLocal",
        serialize_with = "ser_timestamp",
        deserialize_with = "de_timestamp"
    )]
    pub timestamp: NaiveDateTime, // ⇔ rawdata.dateEventLocal, facility wall clock
    #[serde(rename = "eventName", default)]
    pub category: String,
    #[serde(rename = "coreID", default)]
    pub device_id: String,
    #[serde(rename = "deviceFunction", default)]
    pub device_function: String,
    #[serde(rename = "logEvent")]
    pub log_event: LogEvent,
    #[serde(rename = "clientID", default, deserialize_with = "de_client_id")]
    pub client_id: i64, // 0 = no member
    #[serde(rename = "firstName", default)]
    pub first_name: String, // snapshot at write time
    #[serde(rename = "logData", default)]
    pub log_data: String,
}

impl Event {
    /// Event with only the fields the aggregations look at; device fields empty.
    pub fn new(
        record_number: i64,
        timestamp: NaiveDateTime,
        log_event: LogEvent,
        client_id: i64,
        first_name: &str,
    ) -> Self {
        Self {
            record_number,
            timestamp,
            device_id: String::new(),
            category: String::new(),
            device_function: String::new(),
            log_event,
            client_id,
            first_name: first_name.to_string(),
            log_data: String::new(),
        }
    }

    pub fn with_device(mut self, device_id: &str, device_function: &str) -> Self {
        self.device_id = device_id.to_string();
        self.device_function = device_function.to_string();
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// False for the `clientID = 0` sentinel.
    pub fn is_member(&self) -> bool {
        self.client_id != 0
    }
}

fn ser_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
}

fn de_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid dateEventLocal: {raw}")))
}

/// Dumps write `NULL` or nothing for events that are not tied to a member.
fn de_client_id<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(d)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| serde::de::Error::custom(format!("invalid clientID: {raw}")))
}
