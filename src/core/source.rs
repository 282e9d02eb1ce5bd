//! # Data Source
//!
//! Loads the meeting to display, either the bundled sample or a JSON file,
//! and converts the wire format into the typed [`Meeting`] model.
//!
//! This is the validation boundary. Timestamps are parsed here, participant
//! ids are checked for uniqueness, and a session whose end is not after its
//! start is rejected outright rather than producing non-finite geometry
//! later on. A document that is just `null` is an absent data source and
//! loads as `Ok(None)`.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::core::clock::parse_timestamp;
use crate::core::config::ResolvedConfig;
use crate::core::meeting::{ErrorEvent, Interval, Meeting, Participant};

const SAMPLE_MEETING: &str = include_str!("../../data/sample_meeting.json");

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeeting {
    start: String,
    end: String,
    #[serde(default)]
    participant_array: Vec<RawParticipant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParticipant {
    participant_id: String,
    name: String,
    #[serde(default)]
    timelog: Vec<RawInterval>,
    #[serde(default)]
    events: RawEvents,
}

#[derive(Debug, Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    webcam: Vec<RawInterval>,
    #[serde(default)]
    mic: Vec<RawInterval>,
    #[serde(default)]
    errors: Option<Vec<RawError>>,
}

#[derive(Debug, Deserialize)]
struct RawInterval {
    start: String,
    end: String,
}

#[derive(Debug, Deserialize)]
struct RawError {
    start: String,
    message: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid meeting JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timestamp {value:?} at {field}: {source}")]
    Timestamp {
        field: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("session end {end} is not after start {start}")]
    EmptySession { start: String, end: String },
    #[error("participant id {0:?} appears more than once")]
    DuplicateParticipant(String),
}

// ============================================================================
// Loading
// ============================================================================

/// Where the meeting comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Sample,
    File(PathBuf),
}

impl DataSource {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        match &config.data_file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Sample,
        }
    }

    pub fn load(&self) -> Result<Option<Meeting>, DataError> {
        match self {
            DataSource::Sample => {
                debug!("Loading bundled sample meeting");
                parse_meeting(SAMPLE_MEETING)
            }
            DataSource::File(path) => {
                let json = fs::read_to_string(path).map_err(|source| DataError::Io {
                    path: path.clone(),
                    source,
                })?;
                let meeting = parse_meeting(&json)?;
                info!(
                    "Loaded meeting from {} ({} participants)",
                    path.display(),
                    meeting.as_ref().map_or(0, |m| m.participants.len())
                );
                Ok(meeting)
            }
        }
    }
}

/// Parse and validate a meeting document. `null` yields `Ok(None)`.
pub fn parse_meeting(json: &str) -> Result<Option<Meeting>, DataError> {
    let raw: Option<RawMeeting> = serde_json::from_str(json)?;
    raw.map(validate).transpose()
}

fn validate(raw: RawMeeting) -> Result<Meeting, DataError> {
    let start = timestamp("start", &raw.start)?;
    let end = timestamp("end", &raw.end)?;
    if end <= start {
        return Err(DataError::EmptySession {
            start: raw.start,
            end: raw.end,
        });
    }

    let mut seen = HashSet::new();
    let mut participants = Vec::with_capacity(raw.participant_array.len());
    for (index, raw_participant) in raw.participant_array.into_iter().enumerate() {
        if !seen.insert(raw_participant.participant_id.clone()) {
            return Err(DataError::DuplicateParticipant(raw_participant.participant_id));
        }
        participants.push(participant(index, raw_participant)?);
    }

    Ok(Meeting {
        session: Interval::new(start, end),
        participants,
    })
}

fn participant(index: usize, raw: RawParticipant) -> Result<Participant, DataError> {
    let prefix = format!("participantArray[{index}]");
    let errors = raw
        .events
        .errors
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, e)| {
            Ok(ErrorEvent {
                at: timestamp(&format!("{prefix}.events.errors[{i}].start"), &e.start)?,
                message: e.message,
            })
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    Ok(Participant {
        connections: intervals(&format!("{prefix}.timelog"), &raw.timelog)?,
        webcam: intervals(&format!("{prefix}.events.webcam"), &raw.events.webcam)?,
        mic: intervals(&format!("{prefix}.events.mic"), &raw.events.mic)?,
        errors,
        id: raw.participant_id,
        name: raw.name,
    })
}

fn intervals(field: &str, raw: &[RawInterval]) -> Result<Vec<Interval>, DataError> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| {
            Ok(Interval::new(
                timestamp(&format!("{field}[{i}].start"), &r.start)?,
                timestamp(&format!("{field}[{i}].end"), &r.end)?,
            ))
        })
        .collect()
}

fn timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, DataError> {
    parse_timestamp(value).map_err(|source| DataError::Timestamp {
        field: field.to_string(),
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ts;

    const MINIMAL: &str = r#"{
        "start": "2024-06-05T08:00:00Z",
        "end": "2024-06-05T08:03:00Z",
        "participantArray": [
            {
                "participantId": "p1",
                "name": "Ada",
                "timelog": [{ "start": "2024-06-05T08:00:30Z", "end": "2024-06-05T08:02:45Z" }]
            }
        ]
    }"#;

    #[test]
    fn test_parse_minimal_meeting_defaults_events() {
        let meeting = parse_meeting(MINIMAL).unwrap().expect("meeting present");
        assert_eq!(meeting.session, Interval::new(ts("08:00:00"), ts("08:03:00")));
        assert_eq!(meeting.participants.len(), 1);

        let p = &meeting.participants[0];
        assert_eq!(p.id, "p1");
        assert_eq!(p.name, "Ada");
        assert_eq!(p.connections, vec![Interval::new(ts("08:00:30"), ts("08:02:45"))]);
        assert!(p.webcam.is_empty());
        assert!(p.mic.is_empty());
        assert!(p.errors.is_empty());
    }

    #[test]
    fn test_parse_full_events() {
        let json = r#"{
            "start": "2024-06-05T08:00:00Z",
            "end": "2024-06-05T08:03:00Z",
            "participantArray": [{
                "participantId": "p1",
                "name": "Ada",
                "timelog": [],
                "events": {
                    "webcam": [{ "start": "2024-06-05T08:00:00Z", "end": "2024-06-05T08:01:00Z" }],
                    "mic": [],
                    "errors": [{ "start": "2024-06-05T08:01:00Z", "message": "Camera lost" }]
                }
            }]
        }"#;
        let meeting = parse_meeting(json).unwrap().unwrap();
        let p = &meeting.participants[0];
        assert_eq!(p.webcam.len(), 1);
        assert_eq!(p.errors[0].at, ts("08:01:00"));
        assert_eq!(p.errors[0].message, "Camera lost");
    }

    #[test]
    fn test_null_document_is_absent_source() {
        assert!(parse_meeting("null").unwrap().is_none());
    }

    #[test]
    fn test_empty_participant_list() {
        let json = r#"{ "start": "2024-06-05T08:00:00Z", "end": "2024-06-05T08:03:00Z", "participantArray": [] }"#;
        assert!(parse_meeting(json).unwrap().unwrap().participants.is_empty());
    }

    #[test]
    fn test_zero_length_session_rejected() {
        let json = r#"{ "start": "2024-06-05T08:00:00Z", "end": "2024-06-05T08:00:00Z" }"#;
        assert!(matches!(parse_meeting(json), Err(DataError::EmptySession { .. })));
    }

    #[test]
    fn test_inverted_session_rejected() {
        let json = r#"{ "start": "2024-06-05T08:03:00Z", "end": "2024-06-05T08:00:00Z" }"#;
        assert!(matches!(parse_meeting(json), Err(DataError::EmptySession { .. })));
    }

    #[test]
    fn test_bad_timestamp_names_the_field() {
        let json = MINIMAL.replace("2024-06-05T08:02:45Z", "not-a-time");
        let err = parse_meeting(&json).unwrap_err();
        match err {
            DataError::Timestamp { field, value, .. } => {
                assert_eq!(field, "participantArray[0].timelog[0].end");
                assert_eq!(value, "not-a-time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let json = r#"{
            "start": "2024-06-05T08:00:00Z",
            "end": "2024-06-05T08:03:00Z",
            "participantArray": [
                { "participantId": "p1", "name": "Ada" },
                { "participantId": "p1", "name": "Grace" }
            ]
        }"#;
        assert!(matches!(parse_meeting(json), Err(DataError::DuplicateParticipant(id)) if id == "p1"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_meeting("{"), Err(DataError::Json(_))));
    }

    #[test]
    fn test_bundled_sample_loads() {
        let meeting = DataSource::Sample.load().unwrap().expect("sample is not null");
        assert!(!meeting.participants.is_empty());
        assert!(meeting.session.start < meeting.session.end);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = DataSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(source.load(), Err(DataError::Io { .. })));
    }
}
