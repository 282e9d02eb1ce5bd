//! # Dashboard State
//!
//! Core state for one dashboard session. This module contains domain logic
//! only, no TUI-specific types. Presentation state (hover, scroll, tab
//! selection) lives in the `tui` module.
//!
//! ```text
//! Dashboard
//! ├── meeting: Option<Meeting>     // None = data source absent
//! ├── axis: Option<SessionAxis>    // projection domain for the meeting
//! ├── time_markers: Vec<String>    // per-minute navigation labels
//! ├── clock: Clock                 // offset used for formatting
//! ├── timeline_visible: bool       // show/hide toggle, starts true
//! └── status_message: String       // footer text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::clock::{Clock, time_markers};
use crate::core::config::ResolvedConfig;
use crate::core::geometry::{GeometryError, ParticipantLayout, SessionAxis};
use crate::core::meeting::Meeting;

pub struct Dashboard {
    pub meeting: Option<Meeting>,
    pub axis: Option<SessionAxis>,
    pub time_markers: Vec<String>,
    pub clock: Clock,
    pub timeline_visible: bool,
    pub status_message: String,
}

impl Dashboard {
    pub fn new(meeting: Option<Meeting>, config: &ResolvedConfig) -> Result<Self, GeometryError> {
        let axis = meeting
            .as_ref()
            .map(|m| SessionAxis::for_session(&m.session, config.canvas_width))
            .transpose()?;
        let markers = meeting
            .as_ref()
            .map(|m| time_markers(m.session.start, m.session.end, config.clock))
            .unwrap_or_default();

        Ok(Self {
            meeting,
            axis,
            time_markers: markers,
            clock: config.clock,
            timeline_visible: true,
            status_message: String::new(),
        })
    }

    /// Lay out every participant row. Recomputed on each call.
    ///
    /// Returns `None` when there is no data to lay out.
    pub fn layouts(&self) -> Option<Vec<ParticipantLayout>> {
        let meeting = self.meeting.as_ref()?;
        let axis = self.axis.as_ref()?;
        Some(
            meeting
                .participants
                .iter()
                .map(|p| ParticipantLayout::compute(axis, p, self.clock))
                .collect(),
        )
    }

    pub fn participant_count(&self) -> usize {
        self.meeting.as_ref().map_or(0, |m| m.participants.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{meeting, participant};

    #[test]
    fn test_dashboard_new_defaults() {
        let dashboard = Dashboard::new(
            Some(meeting(vec![participant("p1", &[("08:00:30", "08:02:45")])])),
            &ResolvedConfig::default(),
        )
        .unwrap();
        assert!(dashboard.timeline_visible);
        assert_eq!(dashboard.time_markers, vec!["08:00", "08:01", "08:02"]);
        assert_eq!(dashboard.participant_count(), 1);
        assert_eq!(dashboard.layouts().unwrap().len(), 1);
    }

    #[test]
    fn test_dashboard_without_data() {
        let dashboard = Dashboard::new(None, &ResolvedConfig::default()).unwrap();
        assert!(dashboard.time_markers.is_empty());
        assert!(dashboard.axis.is_none());
        assert!(dashboard.layouts().is_none());
        assert_eq!(dashboard.participant_count(), 0);
    }

    #[test]
    fn test_dashboard_empty_participants() {
        let dashboard = Dashboard::new(Some(meeting(vec![])), &ResolvedConfig::default()).unwrap();
        assert_eq!(dashboard.layouts(), Some(vec![]));
    }

    #[test]
    fn test_dashboard_rejects_bad_canvas_width() {
        let config = ResolvedConfig {
            canvas_width: -1.0,
            ..Default::default()
        };
        assert!(Dashboard::new(Some(meeting(vec![])), &config).is_err());
    }
}
