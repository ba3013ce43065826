use crate::models::event::Event;
use crate::models::presence::{PresenceState, PresentMember};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Default)]
struct Track<'a> {
    state: PresenceState,
    arrival: Option<&'a Event>,
}

/// Members checked in on `date`, most recent arrival first.
///
/// Each member's "Checked In"/"Checked Out" events are replayed in
/// record-number order; whoever ends the replay `In` is present. Access
/// events (`"<Kind> allowed"`) only feed the equipment flags.
pub fn resolve_presence(
    events: &[Event],
    date: NaiveDate,
    equipment: &[String],
) -> Vec<PresentMember> {
    let mut day: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_member() && e.date() == date)
        .collect();
    day.sort_by_key(|e| e.record_number);

    let mut tracks: HashMap<i64, Track> = HashMap::new();
    let mut granted: HashMap<i64, HashSet<&str>> = HashMap::new();

    for ev in day {
        if ev.log_event.is_presence() {
            let track = tracks.entry(ev.client_id).or_default();
            track.state = track.state.apply(&ev.log_event);
            if ev.log_event.is_check_in() {
                track.arrival = Some(ev);
            }
        } else if let Some(kind) = ev.log_event.allowed_kind()
            && equipment.iter().any(|k| k == kind)
        {
            granted.entry(ev.client_id).or_default().insert(kind);
        }
    }

    let mut present: Vec<PresentMember> = tracks
        .into_iter()
        .filter(|(_, t)| t.state.is_in())
        .filter_map(|(client_id, t)| {
            let arrival = t.arrival?;
            let kinds = granted.get(&client_id);
            let flags: BTreeMap<String, bool> = equipment
                .iter()
                .map(|k| (k.clone(), kinds.is_some_and(|g| g.contains(k.as_str()))))
                .collect();

            Some(PresentMember {
                client_id,
                first_name: arrival.first_name.clone(),
                checked_in_at: arrival.timestamp,
                record_number: arrival.record_number,
                equipment: flags,
            })
        })
        .collect();

    present.sort_by(|a, b| {
        b.checked_in_at
            .cmp(&a.checked_in_at)
            .then(b.record_number.cmp(&a.record_number))
    });
    present
}
