//! # Meeting Data Model
//!
//! Typed view of one conferencing session, built from the loosely-typed
//! wire format in [`crate::core::source`]. Every timestamp has already been
//! parsed and the session interval has already been checked by the time a
//! [`Meeting`] exists.
//!
//! ```text
//! Meeting
//! ├── session: Interval              // normalization domain for the timeline
//! └── participants: Vec<Participant>
//!     ├── connections: Vec<Interval> // join → leave spans, source order
//!     ├── webcam / mic: Vec<Interval>
//!     └── errors: Vec<ErrorEvent>
//! ```

use chrono::{DateTime, FixedOffset};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    pub at: DateTime<FixedOffset>,
    pub message: String,
}

/// Which media devices a participant used at any point in the session.
///
/// Replaces the "has webcam → desktop" guess: both-or-neither cases get
/// their own variant instead of falling into the phone bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceCapability {
    VideoAndAudio,
    VideoOnly,
    AudioOnly,
    NoMedia,
}

impl DeviceCapability {
    pub fn label(self) -> &'static str {
        match self {
            DeviceCapability::VideoAndAudio => "camera + microphone",
            DeviceCapability::VideoOnly => "camera only",
            DeviceCapability::AudioOnly => "microphone only",
            DeviceCapability::NoMedia => "no media",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub connections: Vec<Interval>,
    pub webcam: Vec<Interval>,
    pub mic: Vec<Interval>,
    pub errors: Vec<ErrorEvent>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connections: Vec::new(),
            webcam: Vec::new(),
            mic: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn first_connection(&self) -> Option<&Interval> {
        self.connections.first()
    }

    pub fn last_connection(&self) -> Option<&Interval> {
        self.connections.last()
    }

    /// More than one connection interval means the participant dropped and
    /// came back at least once.
    pub fn has_reconnections(&self) -> bool {
        self.connections.len() > 1
    }

    pub fn capability(&self) -> DeviceCapability {
        match (!self.webcam.is_empty(), !self.mic.is_empty()) {
            (true, true) => DeviceCapability::VideoAndAudio,
            (true, false) => DeviceCapability::VideoOnly,
            (false, true) => DeviceCapability::AudioOnly,
            (false, false) => DeviceCapability::NoMedia,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub session: Interval,
    pub participants: Vec<Participant>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{interval, participant};

    #[test]
    fn test_capability_covers_every_combination() {
        let mut p = participant("p1", &[]);
        assert_eq!(p.capability(), DeviceCapability::NoMedia);

        p.mic.push(interval("08:00:00", "08:01:00"));
        assert_eq!(p.capability(), DeviceCapability::AudioOnly);

        p.webcam.push(interval("08:00:00", "08:01:00"));
        assert_eq!(p.capability(), DeviceCapability::VideoAndAudio);

        p.mic.clear();
        assert_eq!(p.capability(), DeviceCapability::VideoOnly);
    }

    #[test]
    fn test_reconnections_need_more_than_one_interval() {
        let once = participant("p1", &[("08:00:00", "08:01:00")]);
        assert!(!once.has_reconnections());

        let twice = participant("p2", &[("08:00:00", "08:01:00"), ("08:01:30", "08:02:00")]);
        assert!(twice.has_reconnections());
        assert_eq!(twice.first_connection().unwrap().start, twice.connections[0].start);
        assert_eq!(twice.last_connection().unwrap().end, twice.connections[1].end);
    }
}
