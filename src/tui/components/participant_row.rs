//! # ParticipantRow Component
//!
//! One participant in the timeline list. Stateless: the hovered marker is a
//! prop handed down by the parent [`Timeline`](super::timeline::Timeline).
//!
//! ```text
//! ┌ Name (id)                                       View details › ┐  line 0
//! │ June 05 2024, 08:00  |  Duration 2 Mins                        │  line 1
//! │                 ▐ Joined: 08:00 ▌                              │  line 2 (tooltip)
//! │ ○━━━━━━━━━━━━━━━━━━━━━◉━━━━━━━━━━━━━━━!━━━━━━━━━━━━━━━━━━━━⇥   │  line 3 (track)
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::geometry::{MarkerId, ParticipantLayout};
use crate::tui::components::track::Track;
use crate::tui::theme;

/// Lines occupied by one row (title, meta, tooltip, track).
pub const ROW_HEIGHT: u16 = 4;
/// Line within the row that holds the track.
pub const TRACK_LINE: u16 = 3;
const TOOLTIP_LINE: u16 = 2;
/// Horizontal padding on both sides of the row content.
pub const ROW_PADDING: u16 = 2;
const DETAILS_LINK: &str = "View details ›";

pub struct ParticipantRow<'a> {
    pub layout: &'a ParticipantLayout,
    pub canvas_width: f64,
    pub hovered: Option<MarkerId>,
}

impl<'a> ParticipantRow<'a> {
    pub fn new(layout: &'a ParticipantLayout, canvas_width: f64, hovered: Option<MarkerId>) -> Self {
        Self {
            layout,
            canvas_width,
            hovered,
        }
    }

    /// The single line the track is drawn into, relative to the row area.
    pub fn track_area(area: Rect) -> Rect {
        Rect::new(
            area.x + ROW_PADDING.min(area.width),
            area.y + TRACK_LINE,
            area.width.saturating_sub(ROW_PADDING * 2),
            1,
        )
    }

    fn render_tooltip(&self, track: &Track, track_area: Rect, buf: &mut Buffer) {
        let Some(marker) = self.hovered.and_then(|id| self.layout.marker(id)) else {
            return;
        };
        if track_area.width == 0 {
            return;
        }

        let text = format!(" {} ", marker.tooltip);
        let max = track_area.width as usize;
        let text: String = if text.width() > max {
            let mut used = 0;
            text.chars()
                .take_while(|c| {
                    used += c.width().unwrap_or(0);
                    used <= max
                })
                .collect()
        } else {
            text
        };

        let width = text.width() as u16;
        let anchor = track.anchor_of(marker);
        let left = anchor
            .saturating_sub(width / 2)
            .min(track_area.width.saturating_sub(width));
        let style = Style::default().fg(theme::FG).bg(theme::TOOLTIP_BG);
        buf.set_string(track_area.x + left, track_area.y - TRACK_LINE + TOOLTIP_LINE, text, style);
    }
}

impl Widget for ParticipantRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < ROW_HEIGHT || area.width <= ROW_PADDING * 2 {
            return;
        }
        let inner_x = area.x + ROW_PADDING;
        let inner_right = area.right() - ROW_PADDING;

        buf.set_stringn(
            inner_x,
            area.y,
            &self.layout.title,
            (inner_right - inner_x) as usize,
            Style::default().fg(theme::FG).add_modifier(Modifier::BOLD),
        );

        let link_width = DETAILS_LINK.width() as u16;
        let title_end = inner_x + self.layout.title.width() as u16;
        if inner_right >= link_width && inner_right - link_width > title_end {
            buf.set_string(
                inner_right - link_width,
                area.y,
                DETAILS_LINK,
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            );
        }

        let meta = format!(
            "{}  |  Duration {}",
            self.layout.date_label, self.layout.duration_label
        );
        buf.set_stringn(
            inner_x,
            area.y + 1,
            meta,
            (inner_right - inner_x) as usize,
            Style::default().fg(theme::MUTED),
        );

        let track_area = Self::track_area(area);
        let track = Track::rasterize(self.layout, self.canvas_width, track_area.width);
        for (i, cell) in track.cells().iter().enumerate() {
            if let Some(target) = buf.cell_mut((track_area.x + i as u16, track_area.y)) {
                target.set_symbol(&cell.symbol).set_style(cell.style);
            }
        }

        self.render_tooltip(&track, track_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::Clock;
    use crate::core::geometry::{CANVAS_WIDTH, SessionAxis};
    use crate::test_support::{error_at, participant, ts};

    fn row_text(layout: &ParticipantLayout, hovered: Option<MarkerId>) -> Vec<String> {
        let area = Rect::new(0, 0, 124, ROW_HEIGHT);
        let mut buf = Buffer::empty(area);
        ParticipantRow::new(layout, CANVAS_WIDTH, hovered).render(area, &mut buf);
        (0..ROW_HEIGHT)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
            .collect()
    }

    fn layout() -> ParticipantLayout {
        let axis = SessionAxis::new(ts("08:00:00"), ts("08:03:00"), CANVAS_WIDTH).unwrap();
        let mut p = participant("p1", &[("08:00:30", "08:02:45")]);
        p.errors = vec![error_at("08:01:00", "Network unstable")];
        ParticipantLayout::compute(&axis, &p, Clock::Source)
    }

    #[test]
    fn test_row_header_lines() {
        let lines = row_text(&layout(), None);
        assert!(lines[0].contains("Guest p1 (p1)"));
        assert!(lines[0].contains(DETAILS_LINK));
        assert!(lines[1].contains("June 05 2024, 08:00  |  Duration 2 Mins"));
        assert!(lines[2].trim().is_empty());
    }

    #[test]
    fn test_track_line_has_markers() {
        let lines = row_text(&layout(), None);
        assert!(lines[3].contains('⇥'));
        assert!(lines[3].contains('!'));
        assert!(lines[3].contains('━'));
    }

    #[test]
    fn test_hovered_marker_shows_tooltip() {
        let lines = row_text(&layout(), Some(MarkerId::Error(0)));
        assert!(lines[2].contains("Error at 08:01: Network unstable"));

        let lines = row_text(&layout(), Some(MarkerId::Join));
        assert!(lines[2].contains("Joined: 08:00"));
        assert!(!lines[2].contains("Error at"));
    }

    #[test]
    fn test_tooltip_for_missing_marker_is_ignored() {
        let lines = row_text(&layout(), Some(MarkerId::Webcam(3)));
        assert!(lines[2].trim().is_empty());
    }

    #[test]
    fn test_track_area_geometry() {
        let area = Rect::new(0, 10, 50, ROW_HEIGHT);
        assert_eq!(ParticipantRow::track_area(area), Rect::new(2, 13, 46, 1));
    }
}
