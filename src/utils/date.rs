use crate::errors::{AppError, AppResult};
use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Layout of `dateEventLocal` as written by the readers (`%F %T`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const TIMESTAMP_FALLBACKS: [&str; 4] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| AppError::InvalidDate(s.into()))
}

/// Parse a local wall-clock timestamp. A bare date means midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FALLBACKS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

/// Same as `parse_timestamp` but for user input: a bare date means end of day,
/// so `--as-of 2025-03-14` covers the whole day.
pub fn parse_as_of(s: &str) -> AppResult<NaiveDateTime> {
    if let Ok(d) = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
        return d
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| AppError::InvalidDateTime(s.into()));
    }
    parse_timestamp(s).ok_or_else(|| AppError::InvalidDateTime(s.into()))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// First day of a trailing window of `days` days ending on `end` (inclusive).
pub fn window_start(end: NaiveDate, days: u32) -> NaiveDate {
    end.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_accept_reader_and_iso_layouts() {
        let expected = NaiveDate::from_ymd_opt(2020, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2020-03-14 09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2020-03-14T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2020-03-14 09:30"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn as_of_date_means_end_of_day() {
        let ts = parse_as_of("2020-03-14").unwrap();
        assert_eq!(ts.format(TIMESTAMP_FORMAT).to_string(), "2020-03-14 23:59:59");
        assert!(parse_as_of("14/03/2020").is_err());
    }

    #[test]
    fn window_start_counts_back_whole_days() {
        let end = NaiveDate::from_ymd_opt(2020, 3, 31).unwrap();
        assert_eq!(
            window_start(end, 90),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert_eq!(window_start(end, 0), end);
    }
}
