//! # Timeline Component
//!
//! Vertically scrolling list of [`ParticipantRow`]s separated by thin rules.
//!
//! ## Hover
//!
//! `TimelineState::hovered` is the one piece of state the timeline owns. It
//! is a single scalar, so at most one tooltip is visible at a time and the
//! last pointer-enter wins:
//!
//! ```text
//! none ──pointer_enter(id)──▶ hovered(id) ──pointer_leave(id)──▶ none
//! ```
//!
//! The terminal reports pointer positions, not enter/leave, so
//! [`TimelineState::track_pointer`] derives the transitions from successive
//! hit-test results.

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::geometry::{MarkerId, ParticipantLayout};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::participant_row::{ParticipantRow, ROW_HEIGHT, TRACK_LINE};
use crate::tui::components::track::Track;
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Row plus the separator line below it.
pub const ROW_STRIDE: u16 = ROW_HEIGHT + 1;

/// A marker within a specific participant's row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverTarget {
    pub participant_id: String,
    pub marker: MarkerId,
}

pub struct TimelineState {
    pub hovered: Option<HoverTarget>,
    pub scroll_state: ScrollViewState,
    /// Last known viewport and content heights (for scroll clamping)
    viewport_height: u16,
    content_height: u16,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineState {
    pub fn new() -> Self {
        Self {
            hovered: None,
            scroll_state: ScrollViewState::default(),
            viewport_height: 0,
            content_height: 0,
        }
    }

    pub fn pointer_enter(&mut self, target: HoverTarget) {
        debug!("Hover enter: {} {:?}", target.participant_id, target.marker);
        self.hovered = Some(target);
    }

    /// Clears the hover only if `target` is the one currently hovered.
    pub fn pointer_leave(&mut self, target: &HoverTarget) {
        if self.hovered.as_ref() == Some(target) {
            debug!("Hover leave: {} {:?}", target.participant_id, target.marker);
            self.hovered = None;
        }
    }

    /// Feed the marker under the pointer (or `None`) after a mouse move.
    pub fn track_pointer(&mut self, hit: Option<HoverTarget>) {
        if self.hovered == hit {
            return;
        }
        if let Some(current) = self.hovered.clone() {
            self.pointer_leave(&current);
        }
        if let Some(target) = hit {
            self.pointer_enter(target);
        }
    }

    pub fn hovered_marker_for(&self, participant_id: &str) -> Option<MarkerId> {
        self.hovered
            .as_ref()
            .filter(|h| h.participant_id == participant_id)
            .map(|h| h.marker)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for TimelineState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

fn content_height(rows: usize) -> u16 {
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_mul(ROW_STRIDE)
        .saturating_sub(1)
}

/// Participant list, created fresh each frame.
pub struct Timeline<'a> {
    pub state: &'a mut TimelineState,
    pub layouts: &'a [ParticipantLayout],
    pub canvas_width: f64,
}

impl<'a> Timeline<'a> {
    pub fn new(state: &'a mut TimelineState, layouts: &'a [ParticipantLayout], canvas_width: f64) -> Self {
        Self {
            state,
            layouts,
            canvas_width,
        }
    }
}

impl Component for Timeline<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let total_height = content_height(self.layouts.len());

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        if self.layouts.is_empty() {
            return;
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let separator = Paragraph::new("─".repeat(content_width as usize))
            .style(Style::default().fg(theme::BORDER));

        for (i, layout) in self.layouts.iter().enumerate() {
            let y = i as u16 * ROW_STRIDE;
            let hovered = self.state.hovered_marker_for(&layout.participant_id);
            let row = ParticipantRow::new(layout, self.canvas_width, hovered);
            scroll_view.render_widget(row, Rect::new(0, y, content_width, ROW_HEIGHT));

            if i + 1 < self.layouts.len() {
                scroll_view.render_widget(separator.clone(), Rect::new(0, y + ROW_HEIGHT, content_width, 1));
            }
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Which marker (if any) is drawn at screen cell `(column, row)`.
///
/// `area` is the timeline viewport and `scroll_offset_y` its current scroll.
pub fn hit_test(
    area: Rect,
    scroll_offset_y: u16,
    layouts: &[ParticipantLayout],
    canvas_width: f64,
    column: u16,
    row: u16,
) -> Option<HoverTarget> {
    if !area.contains(Position { x: column, y: row }) {
        return None;
    }

    let content_y = (row - area.y) + scroll_offset_y;
    if content_y % ROW_STRIDE != TRACK_LINE {
        return None;
    }
    let layout = layouts.get((content_y / ROW_STRIDE) as usize)?;

    let content_width = area.width.saturating_sub(1);
    let track_area = ParticipantRow::track_area(Rect::new(0, 0, content_width, ROW_HEIGHT));
    let x = column - area.x;
    if x < track_area.x || x >= track_area.right() {
        return None;
    }

    let track = Track::rasterize(layout, canvas_width, track_area.width);
    track.owner_at(x - track_area.x).map(|marker| HoverTarget {
        participant_id: layout.participant_id.clone(),
        marker,
    })
}
