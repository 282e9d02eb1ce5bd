//! # Timeline Geometry
//!
//! Projects a participant's intervals onto a fixed-width canvas. Everything
//! here is measured in canvas units; the renderer decides how units map onto
//! terminal columns.
//!
//! ```text
//! position(t)    = max(0, (t - S) / (E - S) * W)
//! width(t0, t1)  = max(4, (t1 - t0) / (E - S) * W)
//! ```
//!
//! [`SessionAxis::new`] refuses empty and inverted sessions, so neither
//! function can divide by zero.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::core::clock::{Clock, duration_label};
use crate::core::meeting::{DeviceCapability, Interval, Participant};

/// Default canvas width in units.
pub const CANVAS_WIDTH: f64 = 1200.0;
/// Inset of the session bar from the join and leave positions. Join and leave
/// markers are drawn this wide.
pub const MARKER_HALF_WIDTH: f64 = 24.0;
/// Width of the webcam/mic icon that precedes an activity bar.
pub const DEVICE_ICON_WIDTH: f64 = 22.0;
/// Distance from the join marker to the reconnection badge.
pub const RECONNECT_BADGE_OFFSET: f64 = 45.0;
/// Floor applied by [`SessionAxis::width`] so short spans stay visible.
pub const MIN_EVENT_WIDTH: f64 = 4.0;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("session must end after it starts (start {start}, end {end})")]
    EmptySession {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },
    #[error("canvas width must be a positive number, got {0}")]
    InvalidCanvasWidth(f64),
}

/// The normalization domain: a session interval stretched over `width` units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionAxis {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    canvas_width: f64,
    span_ms: f64,
}

impl SessionAxis {
    pub fn new(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        canvas_width: f64,
    ) -> Result<Self, GeometryError> {
        if end <= start {
            return Err(GeometryError::EmptySession { start, end });
        }
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(GeometryError::InvalidCanvasWidth(canvas_width));
        }
        Ok(Self {
            start,
            end,
            canvas_width,
            span_ms: (end - start).num_milliseconds() as f64,
        })
    }

    pub fn for_session(session: &Interval, canvas_width: f64) -> Result<Self, GeometryError> {
        Self::new(session.start, session.end, canvas_width)
    }

    pub fn start(&self) -> DateTime<FixedOffset> {
        self.start
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Offset of `t` on the canvas. Clamped at 0 on the left, unclamped on
    /// the right: instants after the session end land past the canvas.
    pub fn position(&self, t: DateTime<FixedOffset>) -> f64 {
        let offset_ms = (t - self.start).num_milliseconds() as f64;
        (offset_ms / self.span_ms * self.canvas_width).max(0.0)
    }

    /// Length of `t0..t1` on the canvas, never less than [`MIN_EVENT_WIDTH`].
    pub fn width(&self, t0: DateTime<FixedOffset>, t1: DateTime<FixedOffset>) -> f64 {
        let duration_ms = (t1 - t0).num_milliseconds() as f64;
        (duration_ms / self.span_ms * self.canvas_width).max(MIN_EVENT_WIDTH)
    }
}

/// Identifies a hoverable element within one participant row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerId {
    Join,
    Leave,
    Webcam(usize),
    Mic(usize),
    Error(usize),
    Reconnect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Join,
    Leave,
    Webcam,
    Mic,
    Error,
    ReconnectBadge,
}

impl MarkerId {
    pub fn kind(self) -> MarkerKind {
        match self {
            MarkerId::Join => MarkerKind::Join,
            MarkerId::Leave => MarkerKind::Leave,
            MarkerId::Webcam(_) => MarkerKind::Webcam,
            MarkerId::Mic(_) => MarkerKind::Mic,
            MarkerId::Error(_) => MarkerKind::Error,
            MarkerId::Reconnect => MarkerKind::ReconnectBadge,
        }
    }
}

/// A derived, per-render marker. `offset` and `width` are the drawn extent.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineMarker {
    pub id: MarkerId,
    pub offset: f64,
    pub width: f64,
    pub tooltip: String,
}

impl TimelineMarker {
    pub fn kind(&self) -> MarkerKind {
        self.id.kind()
    }
}

/// A plain horizontal bar: not hoverable, no tooltip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bar {
    pub offset: f64,
    pub width: f64,
}

/// One webcam or mic interval: an icon followed by its activity bar.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSegment {
    pub icon: TimelineMarker,
    pub bar: Bar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReconnectBadge {
    pub marker: TimelineMarker,
    pub count: usize,
}

/// Everything needed to draw one participant row.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantLayout {
    pub participant_id: String,
    pub title: String,
    pub date_label: String,
    pub duration_label: String,
    pub capability: DeviceCapability,
    /// False when the participant has no connection intervals; `join_position`
    /// and `leave_position` are then sentinels (0 and the canvas width).
    pub has_connection_data: bool,
    pub join_position: f64,
    pub leave_position: f64,
    pub join: TimelineMarker,
    pub session_bar: Option<Bar>,
    pub webcam: Vec<DeviceSegment>,
    pub mic: Vec<DeviceSegment>,
    pub errors: Vec<TimelineMarker>,
    pub reconnect: Option<ReconnectBadge>,
    pub leave: TimelineMarker,
}

impl ParticipantLayout {
    pub fn compute(axis: &SessionAxis, participant: &Participant, clock: Clock) -> Self {
        let first = participant.first_connection();
        let last = participant.last_connection();

        let join_position = first.map_or(0.0, |c| axis.position(c.start));
        let leave_position = last.map_or(axis.canvas_width(), |c| axis.position(c.end));

        let join = TimelineMarker {
            id: MarkerId::Join,
            offset: join_position,
            width: MARKER_HALF_WIDTH,
            tooltip: format!(
                "Joined: {}",
                first.map_or_else(|| "N/A".to_string(), |c| clock.time(c.start))
            ),
        };
        let leave = TimelineMarker {
            id: MarkerId::Leave,
            offset: leave_position - MARKER_HALF_WIDTH,
            width: MARKER_HALF_WIDTH,
            tooltip: format!(
                "Left: {}",
                last.map_or_else(|| "N/A".to_string(), |c| clock.time(c.end))
            ),
        };

        let session_bar = first.zip(last).map(|_| Bar {
            offset: join_position + MARKER_HALF_WIDTH,
            width: (leave_position - join_position - 2.0 * MARKER_HALF_WIDTH).max(0.0),
        });

        let webcam = device_segments(axis, &participant.webcam, clock, "Video", MarkerId::Webcam);
        let mic = device_segments(axis, &participant.mic, clock, "Microphone", MarkerId::Mic);

        let errors = participant
            .errors
            .iter()
            .enumerate()
            .map(|(i, error)| TimelineMarker {
                id: MarkerId::Error(i),
                offset: axis.position(error.at),
                width: 0.0,
                tooltip: format!("Error at {}: {}", clock.time(error.at), error.message),
            })
            .collect();

        let count = participant.connections.len();
        let reconnect = participant.has_reconnections().then(|| ReconnectBadge {
            marker: TimelineMarker {
                id: MarkerId::Reconnect,
                offset: join_position + RECONNECT_BADGE_OFFSET,
                width: DEVICE_ICON_WIDTH,
                tooltip: format!("Reconnected {count} times"),
            },
            count,
        });

        let (date_label, duration) = match first.zip(last) {
            Some((first, last)) => (clock.date_time(first.start), duration_label(first.start, last.end)),
            None => ("N/A".to_string(), "N/A".to_string()),
        };

        Self {
            participant_id: participant.id.clone(),
            title: format!("{} ({})", participant.name, participant.id),
            date_label,
            duration_label: duration,
            capability: participant.capability(),
            has_connection_data: first.is_some(),
            join_position,
            leave_position,
            join,
            session_bar,
            webcam,
            mic,
            errors,
            reconnect,
            leave,
        }
    }

    /// Hoverable markers in paint order (later ones draw on top).
    pub fn markers(&self) -> impl Iterator<Item = &TimelineMarker> {
        std::iter::once(&self.join)
            .chain(self.webcam.iter().map(|s| &s.icon))
            .chain(self.mic.iter().map(|s| &s.icon))
            .chain(self.errors.iter())
            .chain(self.reconnect.iter().map(|r| &r.marker))
            .chain(std::iter::once(&self.leave))
    }

    pub fn marker(&self, id: MarkerId) -> Option<&TimelineMarker> {
        self.markers().find(|m| m.id == id)
    }
}

fn device_segments(
    axis: &SessionAxis,
    intervals: &[Interval],
    clock: Clock,
    label: &str,
    id: fn(usize) -> MarkerId,
) -> Vec<DeviceSegment> {
    intervals
        .iter()
        .enumerate()
        .map(|(i, interval)| {
            let start = axis.position(interval.start);
            let width = axis.width(interval.start, interval.end);
            DeviceSegment {
                icon: TimelineMarker {
                    id: id(i),
                    offset: start,
                    width: DEVICE_ICON_WIDTH,
                    tooltip: format!(
                        "{label}: {} - {}",
                        clock.time(interval.start),
                        clock.time(interval.end)
                    ),
                },
                bar: Bar {
                    offset: start + DEVICE_ICON_WIDTH,
                    width: (width - DEVICE_ICON_WIDTH).max(0.0),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{error_at, interval, participant, ts};

    fn axis() -> SessionAxis {
        SessionAxis::new(ts("08:00:00"), ts("08:03:00"), CANVAS_WIDTH).unwrap()
    }

    #[test]
    fn test_axis_rejects_empty_and_inverted_sessions() {
        assert!(matches!(
            SessionAxis::new(ts("08:00:00"), ts("08:00:00"), CANVAS_WIDTH),
            Err(GeometryError::EmptySession { .. })
        ));
        assert!(matches!(
            SessionAxis::new(ts("08:03:00"), ts("08:00:00"), CANVAS_WIDTH),
            Err(GeometryError::EmptySession { .. })
        ));
    }

    #[test]
    fn test_axis_rejects_bad_canvas_width() {
        for width in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(SessionAxis::new(ts("08:00:00"), ts("08:03:00"), width).is_err());
        }
    }

    #[test]
    fn test_position_bounds_and_monotonicity() {
        let axis = axis();
        let mut previous = -1.0;
        for second in 0..=180 {
            let t = ts("08:00:00") + chrono::TimeDelta::seconds(second);
            let p = axis.position(t);
            assert!((0.0..=CANVAS_WIDTH).contains(&p), "position {p} out of range");
            assert!(p >= previous);
            previous = p;
        }
        assert_eq!(axis.position(ts("08:00:00")), 0.0);
        assert_eq!(axis.position(ts("08:03:00")), CANVAS_WIDTH);
    }

    #[test]
    fn test_position_clamps_before_start_only() {
        let axis = axis();
        assert_eq!(axis.position(ts("07:59:00")), 0.0);
        assert_eq!(axis.position(ts("07:00:00")), 0.0);
        assert!(axis.position(ts("08:04:30")) > CANVAS_WIDTH);
    }

    #[test]
    fn test_width_has_minimum() {
        let axis = axis();
        assert_eq!(axis.width(ts("08:01:00"), ts("08:01:00")), MIN_EVENT_WIDTH);
        assert_eq!(axis.width(ts("08:01:00"), ts("08:00:00")), MIN_EVENT_WIDTH);
        assert_eq!(axis.width(ts("08:00:00"), ts("08:01:30")), 600.0);
        for seconds in 0..30 {
            let end = ts("08:01:00") + chrono::TimeDelta::seconds(seconds);
            assert!(axis.width(ts("08:01:00"), end) >= MIN_EVENT_WIDTH);
        }
    }

    #[test]
    fn test_layout_for_single_connection() {
        let p = participant("p1", &[("08:00:30", "08:02:45")]);
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        assert!(layout.has_connection_data);
        assert_eq!(layout.join_position, 200.0);
        assert_eq!(layout.leave_position, 1100.0);
        assert_eq!(layout.join.tooltip, "Joined: 08:00");
        assert_eq!(layout.leave.tooltip, "Left: 08:02");
        assert_eq!(layout.leave.offset, 1100.0 - MARKER_HALF_WIDTH);
        assert_eq!(layout.session_bar, Some(Bar { offset: 224.0, width: 852.0 }));
        assert_eq!(layout.duration_label, "2 Mins");
        assert_eq!(layout.date_label, "June 05 2024, 08:00");
        assert_eq!(layout.title, "Guest p1 (p1)");
        assert!(layout.reconnect.is_none());
    }

    #[test]
    fn test_layout_without_connections_uses_sentinels() {
        let p = participant("p1", &[]);
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        assert!(!layout.has_connection_data);
        assert_eq!(layout.join_position, 0.0);
        assert_eq!(layout.leave_position, CANVAS_WIDTH);
        assert!(layout.session_bar.is_none());
        assert_eq!(layout.join.tooltip, "Joined: N/A");
        assert_eq!(layout.leave.tooltip, "Left: N/A");
        assert_eq!(layout.duration_label, "N/A");
        assert_eq!(layout.date_label, "N/A");
    }

    #[test]
    fn test_session_bar_never_negative() {
        let p = participant("p1", &[("08:01:00", "08:01:05")]);
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);
        assert_eq!(layout.session_bar.unwrap().width, 0.0);
    }

    #[test]
    fn test_reconnect_badge_counts_intervals() {
        let p = participant("p1", &[("08:00:00", "08:01:00"), ("08:01:30", "08:02:30")]);
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        let badge = layout.reconnect.expect("badge present");
        assert_eq!(badge.count, 2);
        assert_eq!(badge.marker.offset, RECONNECT_BADGE_OFFSET);
        assert_eq!(badge.marker.tooltip, "Reconnected 2 times");
        assert_eq!(badge.marker.kind(), MarkerKind::ReconnectBadge);
        assert_eq!(layout.duration_label, "2 Mins");
    }

    #[test]
    fn test_device_segments_are_independent() {
        let mut p = participant("p1", &[("08:00:00", "08:03:00")]);
        p.webcam = vec![interval("08:00:00", "08:01:30"), interval("08:00:30", "08:01:00")];
        p.mic = vec![interval("08:00:00", "08:00:01")];
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        assert_eq!(layout.webcam.len(), 2);
        assert_eq!(layout.mic.len(), 1);

        let first = &layout.webcam[0];
        assert_eq!(first.icon.offset, 0.0);
        assert_eq!(first.bar, Bar { offset: DEVICE_ICON_WIDTH, width: 600.0 - DEVICE_ICON_WIDTH });
        assert_eq!(first.icon.tooltip, "Video: 08:00 - 08:01");

        // A one-second interval is narrower than its icon: bar collapses to zero.
        let mic = &layout.mic[0];
        assert_eq!(mic.bar.width, 0.0);
        assert_eq!(mic.icon.tooltip, "Microphone: 08:00 - 08:00");
        assert_eq!(mic.icon.id, MarkerId::Mic(0));
        assert_eq!(layout.capability, DeviceCapability::VideoAndAudio);
    }

    #[test]
    fn test_error_markers() {
        let mut p = participant("p1", &[("08:00:00", "08:03:00")]);
        p.errors = vec![error_at("08:01:00", "Network unstable")];
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        assert_eq!(layout.errors.len(), 1);
        let error = &layout.errors[0];
        assert_eq!(error.offset, axis().position(ts("08:01:00")));
        assert_eq!(error.width, 0.0);
        assert!(error.tooltip.contains("Network unstable"));
        assert_eq!(error.tooltip, "Error at 08:01: Network unstable");
    }

    #[test]
    fn test_markers_in_paint_order() {
        let mut p = participant("p1", &[("08:00:00", "08:01:00"), ("08:02:00", "08:03:00")]);
        p.mic = vec![interval("08:00:10", "08:00:50")];
        p.errors = vec![error_at("08:01:30", "boom")];
        let layout = ParticipantLayout::compute(&axis(), &p, Clock::Source);

        let ids: Vec<MarkerId> = layout.markers().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec![MarkerId::Join, MarkerId::Mic(0), MarkerId::Error(0), MarkerId::Reconnect, MarkerId::Leave]
        );
        assert_eq!(layout.marker(MarkerId::Error(0)).unwrap().tooltip, "Error at 08:01: boom");
        assert!(layout.marker(MarkerId::Webcam(0)).is_none());
    }
}
