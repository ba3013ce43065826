use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Granularity {
    Day,
    Month,
}

/// `(year, month[, day])`. Derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
    pub day: Option<u32>,
}

impl PeriodKey {
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: match granularity {
                Granularity::Day => Some(date.day()),
                Granularity::Month => None,
            },
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(d) => write!(f, "{}-{:02}-{:02}", self.year, self.month, d),
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

/// Distinct members who checked in during one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCount {
    pub period: PeriodKey,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_sort_chronologically() {
        let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();
        let mut keys = vec![
            PeriodKey::of(d(2020, 1, 5), Granularity::Month),
            PeriodKey::of(d(2019, 12, 31), Granularity::Month),
            PeriodKey::of(d(2019, 11, 2), Granularity::Month),
        ];
        keys.sort();
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, ["2019-11", "2019-12", "2020-01"]);
    }

    #[test]
    fn day_key_keeps_day() {
        let key = PeriodKey::of(
            NaiveDate::from_ymd_opt(2019, 10, 3).unwrap(),
            Granularity::Day,
        );
        assert_eq!(key.day, Some(3));
        assert_eq!(key.to_string(), "2019-10-03");
    }
}
