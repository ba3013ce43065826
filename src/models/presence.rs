use super::log_event::LogEvent;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Presence of one member, derived by replaying the day's events in
/// record-number order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum PresenceState {
    #[default]
    Out,
    In,
}

impl PresenceState {
    /// Next state after `event`. Non-presence events leave the state untouched.
    pub fn apply(self, event: &LogEvent) -> Self {
        match event {
            LogEvent::CheckedIn => Self::In,
            LogEvent::CheckedOut => Self::Out,
            _ => self,
        }
    }

    pub fn is_in(self) -> bool {
        self == Self::In
    }
}

/// A member currently checked in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentMember {
    pub client_id: i64,
    pub first_name: String,
    /// Timestamp of the "Checked In" event that made the member present.
    pub checked_in_at: NaiveDateTime,
    pub record_number: i64,
    /// One entry per requested equipment kind.
    pub equipment: BTreeMap<String, bool>,
}

impl PresentMember {
    pub fn has_access(&self, kind: &str) -> bool {
        self.equipment.get(kind).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_presence_event_wins() {
        let seq = [
            LogEvent::CheckedIn,
            LogEvent::CheckedOut,
            LogEvent::Allowed("Woodshop".into()),
            LogEvent::CheckedIn,
        ];
        let end = seq
            .iter()
            .fold(PresenceState::default(), |st, ev| st.apply(ev));
        assert!(end.is_in());

        let out = PresenceState::In.apply(&LogEvent::CheckedOut);
        assert_eq!(out, PresenceState::Out);
    }

    #[test]
    fn access_events_do_not_move_members() {
        assert_eq!(
            PresenceState::Out.apply(&LogEvent::CheckinAllowed),
            PresenceState::Out
        );
        assert_eq!(
            PresenceState::In.apply(&LogEvent::Other("reboot".into())),
            PresenceState::In
        );
    }
}
