use serde::{Deserialize, Serialize};
use std::fmt;

pub const CHECKED_IN: &str = "Checked In";
pub const CHECKED_OUT: &str = "Checked Out";
pub const CHECKIN_ALLOWED: &str = "checkin allowed";
const ALLOWED_SUFFIX: &str = " allowed";

/// Value of the `logEvent` column.
///
/// The readers may start logging new event names at any time, so this is an
/// open set: anything not recognised is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogEvent {
    CheckedIn,
    CheckedOut,
    CheckinAllowed,
    /// `"<Equipment> allowed"`, e.g. `"Woodshop allowed"`.
    Allowed(String),
    Other(String),
}

impl LogEvent {
    /// Convert DB string → LogEvent. Never fails.
    pub fn from_db_str(s: &str) -> Self {
        match s {
            CHECKED_IN => Self::CheckedIn,
            CHECKED_OUT => Self::CheckedOut,
            CHECKIN_ALLOWED => Self::CheckinAllowed,
            other => match other.strip_suffix(ALLOWED_SUFFIX) {
                Some(kind) if !kind.trim().is_empty() => Self::Allowed(kind.to_string()),
                _ => Self::Other(other.to_string()),
            },
        }
    }

    /// Convert LogEvent → DB string (round-trips with `from_db_str`).
    pub fn to_db_string(&self) -> String {
        match self {
            Self::CheckedIn => CHECKED_IN.to_string(),
            Self::CheckedOut => CHECKED_OUT.to_string(),
            Self::CheckinAllowed => CHECKIN_ALLOWED.to_string(),
            Self::Allowed(kind) => format!("{kind}{ALLOWED_SUFFIX}"),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Access event for an equipment kind (`"Woodshop"` → `"Woodshop allowed"`).
    pub fn allowed(kind: &str) -> Self {
        Self::from_db_str(&format!("{kind}{ALLOWED_SUFFIX}"))
    }

    /// Equipment kind granted by this event, if it is an access event.
    pub fn allowed_kind(&self) -> Option<&str> {
        match self {
            Self::CheckinAllowed => Some("checkin"),
            Self::Allowed(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_check_in(&self) -> bool {
        matches!(self, Self::CheckedIn)
    }

    pub fn is_check_out(&self) -> bool {
        matches!(self, Self::CheckedOut)
    }

    /// True for the two events that move a member in or out.
    pub fn is_presence(&self) -> bool {
        self.is_check_in() || self.is_check_out()
    }
}

impl From<String> for LogEvent {
    fn from(s: String) -> Self {
        Self::from_db_str(&s)
    }
}

impl From<LogEvent> for String {
    fn from(ev: LogEvent) -> Self {
        ev.to_db_string()
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_db_string())
    }
}
