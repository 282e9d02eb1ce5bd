//! # Track Rasterizer
//!
//! Turns a [`ParticipantLayout`] (canvas units) into one row of terminal
//! cells. Rendering and mouse hit testing both go through [`Track`], so a
//! hovered cell always belongs to the marker that is visibly drawn there.
//!
//! Elements are painted in this order, later ones on top: join marker,
//! session bar, webcam segments, mic segments, error markers, reconnection
//! badge, leave marker. Bars are not hoverable and clear the owner of any
//! cell they cover.

use std::ops::Range;

use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::core::geometry::{Bar, DeviceSegment, MarkerId, ParticipantLayout, TimelineMarker};
use crate::core::meeting::DeviceCapability;
use crate::tui::theme;

const BAR_GLYPH: &str = "━";
const LEAVE_GLYPH: &str = "⇥";
const WEBCAM_GLYPH: &str = "◉";
const MIC_GLYPH: &str = "♪";
const ERROR_GLYPH: &str = "!";

#[derive(Clone, Debug, PartialEq)]
pub struct TrackCell {
    pub symbol: String,
    pub style: Style,
    pub owner: Option<MarkerId>,
}

impl Default for TrackCell {
    fn default() -> Self {
        Self {
            symbol: " ".to_string(),
            style: Style::default(),
            owner: None,
        }
    }
}

pub struct Track {
    cells: Vec<TrackCell>,
    canvas_width: f64,
}

fn join_glyph(capability: DeviceCapability) -> &'static str {
    match capability {
        DeviceCapability::VideoAndAudio => "▣",
        DeviceCapability::VideoOnly => "▢",
        DeviceCapability::AudioOnly => "▯",
        DeviceCapability::NoMedia => "○",
    }
}

impl Track {
    pub fn rasterize(layout: &ParticipantLayout, canvas_width: f64, columns: u16) -> Self {
        let mut track = Self {
            cells: vec![TrackCell::default(); columns as usize],
            canvas_width,
        };

        let marker_style = Style::default().fg(theme::FG).bg(theme::MARKER);
        let device_style = Style::default().fg(theme::FG).bg(theme::ACCENT);

        track.paint_marker(&layout.join, join_glyph(layout.capability), marker_style);
        if let Some(bar) = layout.session_bar {
            track.paint_bar(bar);
        }
        for segment in &layout.webcam {
            track.paint_segment(segment, WEBCAM_GLYPH, device_style);
        }
        for segment in &layout.mic {
            track.paint_segment(segment, MIC_GLYPH, device_style);
        }
        for error in &layout.errors {
            track.paint_marker(
                error,
                ERROR_GLYPH,
                Style::default()
                    .fg(theme::TOOLTIP_BG)
                    .bg(theme::ERROR)
                    .add_modifier(Modifier::BOLD),
            );
        }
        if let Some(badge) = &layout.reconnect {
            track.paint_marker(
                &badge.marker,
                &badge.count.to_string(),
                Style::default()
                    .fg(theme::TOOLTIP_BG)
                    .bg(theme::BADGE)
                    .add_modifier(Modifier::BOLD),
            );
        }
        track.paint_marker(&layout.leave, LEAVE_GLYPH, marker_style);

        track
    }

    pub fn cells(&self) -> &[TrackCell] {
        &self.cells
    }

    pub fn columns(&self) -> u16 {
        self.cells.len() as u16
    }

    /// Column that canvas offset `units` falls into; may lie outside the track.
    pub fn column_of(&self, units: f64) -> i64 {
        (units / self.canvas_width * self.cells.len() as f64).floor() as i64
    }

    pub fn owner_at(&self, column: u16) -> Option<MarkerId> {
        self.cells.get(column as usize).and_then(|c| c.owner)
    }

    /// Column a tooltip for `marker` should be centered on.
    pub fn anchor_of(&self, marker: &TimelineMarker) -> u16 {
        let last = self.cells.len().saturating_sub(1) as i64;
        self.column_of(marker.offset).clamp(0, last.max(0)) as u16
    }

    fn paint_marker(&mut self, marker: &TimelineMarker, glyph: &str, style: Style) {
        let start = self.column_of(marker.offset);
        let glyph_width = glyph.width().max(1) as i64;
        let end = self
            .column_of(marker.offset + marker.width)
            .max(start.saturating_add(glyph_width));
        let glyph: Vec<char> = glyph.chars().collect();
        for column in self.visible(start, end) {
            let symbol = glyph
                .get((column - start) as usize)
                .map_or_else(|| " ".to_string(), |c| c.to_string());
            self.set(column, symbol, style, Some(marker.id));
        }
    }

    fn paint_bar(&mut self, bar: Bar) {
        if bar.width <= 0.0 {
            return;
        }
        let start = self.column_of(bar.offset);
        let end = self.column_of(bar.offset + bar.width).max(start.saturating_add(1));
        let style = Style::default().fg(theme::ACCENT);
        for column in self.visible(start, end) {
            self.set(column, BAR_GLYPH.to_string(), style, None);
        }
    }

    fn paint_segment(&mut self, segment: &DeviceSegment, glyph: &str, style: Style) {
        self.paint_marker(&segment.icon, glyph, style);
        self.paint_bar(segment.bar);
    }

    /// Clip a column range to the cells that exist.
    fn visible(&self, start: i64, end: i64) -> Range<i64> {
        let len = self.cells.len() as i64;
        start.clamp(0, len)..end.clamp(0, len)
    }

    fn set(&mut self, column: i64, symbol: String, style: Style, owner: Option<MarkerId>) {
        if let Some(cell) = usize::try_from(column).ok().and_then(|c| self.cells.get_mut(c)) {
            *cell = TrackCell { symbol, style, owner };
        }
    }
}
