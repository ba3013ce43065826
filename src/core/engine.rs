//! Report operations over any `EventSource`.
//!
//! Every call reads a fresh snapshot and either returns the complete answer
//! or an error; nothing is cached and nothing is retried.

use crate::core::calculator::attendance::{count_unique_by_period, count_unique_in_window};
use crate::core::calculator::devices::{DeviceSection, group_by_device};
use crate::core::calculator::presence::resolve_presence;
use crate::core::source::{EventFilter, EventSource};
use crate::errors::AppResult;
use crate::models::event::Event;
use crate::models::log_event::LogEvent;
use crate::models::period::{Granularity, PeriodCount};
use crate::models::presence::PresentMember;
use crate::utils::date::window_start;
use chrono::{NaiveDate, NaiveDateTime};

/// Members checked in on `reference_date`, most recent arrival first, with one
/// access flag per entry of `equipment`.
pub fn current_presence<S: EventSource + ?Sized>(
    source: &S,
    reference_date: NaiveDate,
    equipment: &[String],
) -> AppResult<Vec<PresentMember>> {
    let kinds = [LogEvent::CheckedIn, LogEvent::CheckedOut]
        .into_iter()
        .chain(equipment.iter().map(|k| LogEvent::allowed(k)));
    let filter = EventFilter::on(reference_date).with_events(kinds);

    let events = source.events(&filter)?;
    let present = resolve_presence(&events, reference_date, equipment);

    tracing::debug!(
        date = %reference_date,
        rows = events.len(),
        present = present.len(),
        "resolved current presence"
    );
    Ok(present)
}

/// Distinct members checked in per day or month since `since`, oldest first.
pub fn unique_checkins_by_period<S: EventSource + ?Sized>(
    source: &S,
    granularity: Granularity,
    since: NaiveDate,
) -> AppResult<Vec<PeriodCount>> {
    let filter = EventFilter::since(since).with_events([LogEvent::CheckedIn]);

    let events = source.events(&filter)?;
    let counts = count_unique_by_period(&events, granularity, since);

    tracing::debug!(
        ?granularity,
        since = %since,
        rows = events.len(),
        periods = counts.len(),
        "aggregated unique check-ins"
    );
    Ok(counts)
}

/// Distinct members checked in during the `window_days` days up to `as_of`.
/// An empty log yields `0`.
pub fn unique_checkins_in_trailing_window<S: EventSource + ?Sized>(
    source: &S,
    window_days: u32,
    as_of: NaiveDateTime,
) -> AppResult<usize> {
    let filter = EventFilter::between(window_start(as_of.date(), window_days), as_of.date())
        .until(as_of)
        .with_events([LogEvent::CheckedIn]);

    let events = source.events(&filter)?;
    let count = count_unique_in_window(&events, window_days, as_of);

    tracing::debug!(window_days, as_of = %as_of, count, "counted trailing window");
    Ok(count)
}

/// The `limit` most recent events of any kind, newest first.
pub fn recent_events<S: EventSource + ?Sized>(source: &S, limit: usize) -> AppResult<Vec<Event>> {
    source.latest(limit)
}

/// The `limit` most recent events regrouped per device.
pub fn device_log<S: EventSource + ?Sized>(
    source: &S,
    limit: usize,
) -> AppResult<Vec<DeviceSection>> {
    Ok(group_by_device(source.latest(limit)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::MemoryLog;
    use crate::errors::AppError;
    use crate::utils::date::parse_timestamp;

    fn ev(rec: i64, at: &str, kind: LogEvent, client: i64) -> Event {
        Event::new(rec, parse_timestamp(at).unwrap(), kind, client, "Ada")
    }

    struct Unreachable;

    impl EventSource for Unreachable {
        fn events(&self, _filter: &EventFilter) -> AppResult<Vec<Event>> {
            Err(AppError::DataUnavailable("connection refused".into()))
        }

        fn latest(&self, _limit: usize) -> AppResult<Vec<Event>> {
            Err(AppError::DataUnavailable("connection refused".into()))
        }
    }

    #[test]
    fn check_in_out_in_scenario() {
        let d = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
        let mut events = vec![
            ev(1, "2020-03-14 09:00:00", LogEvent::CheckedIn, 5),
            ev(2, "2020-03-14 10:00:00", LogEvent::CheckedOut, 5),
        ];
        let log = MemoryLog::new(events.clone());
        assert!(current_presence(&log, d, &[]).unwrap().is_empty());

        events.push(ev(3, "2020-03-14 11:00:00", LogEvent::CheckedIn, 5));
        let log = MemoryLog::new(events);
        let present = current_presence(&log, d, &[]).unwrap();
        assert_eq!(present.len(), 1);
        assert_eq!(present[0].client_id, 5);
    }

    #[test]
    fn two_members_twice_each_in_march_count_two() {
        let log = MemoryLog::new(vec![
            ev(1, "2020-03-02 09:00:00", LogEvent::CheckedIn, 1),
            ev(2, "2020-03-03 09:00:00", LogEvent::CheckedIn, 2),
            ev(3, "2020-03-09 09:00:00", LogEvent::CheckedIn, 1),
            ev(4, "2020-03-10 09:00:00", LogEvent::CheckedIn, 2),
        ]);
        let since = NaiveDate::from_ymd_opt(2019, 10, 1).unwrap();
        let months = unique_checkins_by_period(&log, Granularity::Month, since).unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].count, 2);
    }

    #[test]
    fn empty_log_is_zero_not_error() {
        let as_of = parse_timestamp("2020-03-14 12:00:00").unwrap();
        let n = unique_checkins_in_trailing_window(&MemoryLog::default(), 90, as_of).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn unreachable_log_fails_every_operation() {
        let d = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
        let as_of = parse_timestamp("2020-03-14 12:00:00").unwrap();

        assert!(matches!(
            current_presence(&Unreachable, d, &[]),
            Err(AppError::DataUnavailable(_))
        ));
        assert!(matches!(
            unique_checkins_by_period(&Unreachable, Granularity::Day, d),
            Err(AppError::DataUnavailable(_))
        ));
        assert!(matches!(
            unique_checkins_in_trailing_window(&Unreachable, 90, as_of),
            Err(AppError::DataUnavailable(_))
        ));
        assert!(matches!(
            device_log(&Unreachable, 10),
            Err(AppError::DataUnavailable(_))
        ));
    }

    #[test]
    fn works_through_a_trait_object() {
        let log: Box<dyn EventSource> = Box::new(MemoryLog::new(vec![ev(
            1,
            "2020-03-14 09:00:00",
            LogEvent::CheckedIn,
            3,
        )]));
        let d = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
        assert_eq!(current_presence(log.as_ref(), d, &[]).unwrap().len(), 1);
        assert_eq!(recent_events(log.as_ref(), 5).unwrap().len(), 1);
    }
}
