//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).
//! All times are on 2024-06-05 in UTC.

use chrono::{DateTime, FixedOffset};

use crate::core::clock::parse_timestamp;
use crate::core::meeting::{ErrorEvent, Interval, Meeting, Participant};

/// `"08:00:30"` → `2024-06-05T08:00:30Z`.
pub fn ts(hms: &str) -> DateTime<FixedOffset> {
    parse_timestamp(&format!("2024-06-05T{hms}Z")).expect("valid test timestamp")
}

pub fn interval(start: &str, end: &str) -> Interval {
    Interval::new(ts(start), ts(end))
}

/// A participant with the given connection intervals and no device activity.
pub fn participant(id: &str, connections: &[(&str, &str)]) -> Participant {
    let mut p = Participant::new(id, format!("Guest {id}"));
    p.connections = connections.iter().map(|(s, e)| interval(s, e)).collect();
    p
}

pub fn error_at(hms: &str, message: &str) -> ErrorEvent {
    ErrorEvent {
        at: ts(hms),
        message: message.to_string(),
    }
}

/// The `08:00:00–08:03:00` session used throughout the tests.
pub fn meeting(participants: Vec<Participant>) -> Meeting {
    Meeting {
        session: interval("08:00:00", "08:03:00"),
        participants,
    }
}
