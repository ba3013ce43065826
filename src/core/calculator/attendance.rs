use crate::models::event::Event;
use crate::models::period::{Granularity, PeriodCount, PeriodKey};
use crate::utils::date::window_start;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

fn counts_as_check_in(ev: &Event) -> bool {
    ev.is_member() && ev.log_event.is_check_in()
}

/// Distinct members with a "Checked In" on or after `since`, per period,
/// in chronological order. Periods without check-ins are not listed.
pub fn count_unique_by_period(
    events: &[Event],
    granularity: Granularity,
    since: NaiveDate,
) -> Vec<PeriodCount> {
    // map: period → members, reduce: set size
    let mut members: BTreeMap<PeriodKey, HashSet<i64>> = BTreeMap::new();

    for ev in events
        .iter()
        .filter(|e| counts_as_check_in(e) && e.date() >= since)
    {
        members
            .entry(PeriodKey::of(ev.date(), granularity))
            .or_default()
            .insert(ev.client_id);
    }

    members
        .into_iter()
        .map(|(period, ids)| PeriodCount {
            period,
            count: ids.len(),
        })
        .collect()
}

/// Distinct members with a "Checked In" dated within the `window_days` days
/// before `as_of` (inclusive) and not stamped after `as_of`.
pub fn count_unique_in_window(events: &[Event], window_days: u32, as_of: NaiveDateTime) -> usize {
    let from = window_start(as_of.date(), window_days);

    events
        .iter()
        .filter(|e| counts_as_check_in(e) && e.date() >= from && e.timestamp <= as_of)
        .map(|e| e.client_id)
        .collect::<HashSet<_>>()
        .len()
}
