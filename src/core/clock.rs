//! # Clock Helpers
//!
//! Time arithmetic shared by the navigation bar and the timeline geometry:
//! timestamp parsing, `HH:mm` formatting, per-minute marker generation and
//! the participant duration label.
//!
//! All timestamps are `DateTime<FixedOffset>` so the offset written in the
//! source data survives parsing. [`Clock`] decides which offset is used when
//! a timestamp is turned back into text.

use chrono::{DateTime, FixedOffset, Local, ParseError, TimeDelta, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Format used for navigation labels and tooltip times.
pub const TIME_FORMAT: &str = "%H:%M";
/// Format used for the date line of a participant row (e.g. `June 05 2024, 08:00`).
pub const DATE_TIME_FORMAT: &str = "%B %d %Y, %H:%M";

/// Which offset to render timestamps in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// Keep the offset each timestamp was written with.
    #[default]
    Source,
    /// Convert to the machine's local time zone.
    Local,
    /// Convert to UTC.
    Utc,
}

impl Clock {
    pub fn format(self, at: DateTime<FixedOffset>, fmt: &str) -> String {
        match self {
            Clock::Source => at.format(fmt).to_string(),
            Clock::Local => at.with_timezone(&Local).format(fmt).to_string(),
            Clock::Utc => at.with_timezone(&Utc).format(fmt).to_string(),
        }
    }

    /// `HH:mm`, 24-hour, zero padded.
    pub fn time(self, at: DateTime<FixedOffset>) -> String {
        self.format(at, TIME_FORMAT)
    }

    pub fn date_time(self, at: DateTime<FixedOffset>) -> String {
        self.format(at, DATE_TIME_FORMAT)
    }

    pub fn label(self) -> &'static str {
        match self {
            Clock::Source => "source",
            Clock::Local => "local",
            Clock::Utc => "utc",
        }
    }
}

/// Parse an ISO 8601 / RFC 3339 timestamp that carries an offset.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_rfc3339(value.trim())
}

/// Every `start + k minutes` strictly before `end`, formatted as `HH:mm`.
///
/// An empty or inverted range yields no markers. There is no cap on the
/// number of markers; a multi-day range produces one label per minute.
pub fn time_markers(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>, clock: Clock) -> Vec<String> {
    let step = TimeDelta::minutes(1);
    let mut markers = Vec::new();
    let mut current = start;
    while current < end {
        markers.push(clock.time(current));
        current = current + step;
    }
    markers
}

/// Whole minutes between `start` and `end`, rendered as `"N Mins"`.
///
/// Sub-minute and negative spans both render as `"0 Mins"`.
pub fn duration_label(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> String {
    let total_seconds = (end - start).num_milliseconds().div_euclid(1000);
    let minutes = total_seconds.div_euclid(60);
    if minutes > 0 {
        format!("{minutes} Mins")
    } else {
        "0 Mins".to_string()
    }
}
