//! Composition root: lays out the frame and routes screen positions back to
//! the component under the pointer.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ header   (title, show-timeline switch)       │ 1
//! │ nav bar  (08:00  08:01  08:02 …)             │ 1
//! │ divider                                      │ 1
//! │ timeline (participant rows) | placeholder    │ *
//! │ footer   (key hints, status)                 │ 1
//! └──────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::Dashboard;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::timeline;
use crate::tui::components::{HeaderBar, HoverTarget, NavBar, Timeline};
use crate::tui::theme;

pub const NO_DATA: &str = "No data available";
const KEY_HINTS: &str = " t Toggle timeline  ←/→ Minute  ↑/↓ Scroll  q Quit ";

pub struct FrameAreas {
    pub header: Rect,
    pub nav: Rect,
    pub divider: Rect,
    pub timeline: Rect,
    pub footer: Rect,
}

pub fn frame_areas(area: Rect) -> FrameAreas {
    use Constraint::{Length, Min};
    let [header, nav, divider, timeline, footer] =
        Layout::vertical([Length(1), Length(1), Length(1), Min(0), Length(1)]).areas(area);
    FrameAreas {
        header,
        nav,
        divider,
        timeline,
        footer,
    }
}

pub fn draw_ui(frame: &mut Frame, dashboard: &Dashboard, tui: &mut TuiState) {
    let area = frame.area();
    let areas = frame_areas(area);
    frame.render_widget(Block::default().style(Style::default().bg(theme::SURFACE)), area);

    HeaderBar::new(dashboard.timeline_visible).render(frame, areas.header);
    NavBar::new(&mut tui.nav, &dashboard.time_markers).render(frame, areas.nav);

    let divider = Paragraph::new("─".repeat(areas.divider.width as usize))
        .style(Style::default().fg(theme::BORDER));
    frame.render_widget(divider, areas.divider);

    // Hidden means not built at all: no layouts are computed.
    if dashboard.timeline_visible {
        match (dashboard.layouts(), dashboard.axis.as_ref()) {
            (Some(layouts), Some(axis)) => {
                Timeline::new(&mut tui.timeline, &layouts, axis.canvas_width())
                    .render(frame, areas.timeline);
            }
            _ => draw_placeholder(frame, areas.timeline),
        }
    }

    let mut footer = vec![Span::styled(KEY_HINTS, Style::default().fg(theme::DIM))];
    if !dashboard.status_message.is_empty() {
        footer.push(Span::styled(
            format!("| {}", dashboard.status_message),
            Style::default().fg(theme::MUTED),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), areas.footer);
}

fn draw_placeholder(frame: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new(NO_DATA)
        .style(Style::default().fg(theme::FG))
        .alignment(Alignment::Center);
    let line = Rect::new(area.x, area.y + area.height.min(1), area.width, area.height.min(1));
    frame.render_widget(placeholder, line);
}

/// What sits under a screen position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    TimelineSwitch,
    NavLabel(usize),
    Marker(HoverTarget),
    Nothing,
}

/// Hit test a screen position against the last drawn frame.
pub fn hit_test(frame_area: Rect, column: u16, row: u16, dashboard: &Dashboard, tui: &TuiState) -> Hit {
    let areas = frame_areas(frame_area);
    let position = Position { x: column, y: row };

    if HeaderBar::switch_area(areas.header).contains(position) {
        return Hit::TimelineSwitch;
    }
    if areas.nav.contains(position) {
        return tui.nav.label_at(column).map_or(Hit::Nothing, Hit::NavLabel);
    }
    if !dashboard.timeline_visible || !areas.timeline.contains(position) {
        return Hit::Nothing;
    }

    let (Some(layouts), Some(axis)) = (dashboard.layouts(), dashboard.axis.as_ref()) else {
        return Hit::Nothing;
    };
    timeline::hit_test(
        areas.timeline,
        tui.timeline.scroll_state.offset().y,
        &layouts,
        axis.canvas_width(),
        column,
        row,
    )
    .map_or(Hit::Nothing, Hit::Marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolvedConfig;
    use crate::core::geometry::MarkerId;
    use crate::test_support::{meeting, participant};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn dashboard() -> Dashboard {
        let m = meeting(vec![participant("p1", &[("08:00:30", "08:02:45")])]);
        Dashboard::new(Some(m), &ResolvedConfig::default()).unwrap()
    }

    fn draw(dashboard: &Dashboard, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(125, 20)).unwrap();
        terminal.draw(|f| draw_ui(f, dashboard, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_full_frame() {
        let dashboard = dashboard();
        let mut tui = TuiState::new(&dashboard);
        let text = draw(&dashboard, &mut tui);
        assert!(text.contains("Participants wise Session Timeline"));
        assert!(text.contains("08:00"));
        assert!(text.contains("08:02"));
        assert!(text.contains("Guest p1 (p1)"));
        assert!(text.contains("Duration 2 Mins"));
    }

    #[test]
    fn test_hit_test_regions() {
        let dashboard = dashboard();
        let mut tui = TuiState::new(&dashboard);
        draw(&dashboard, &mut tui);
        let area = Rect::new(0, 0, 125, 20);

        assert_eq!(hit_test(area, 120, 0, &dashboard, &tui), Hit::TimelineSwitch);
        assert_eq!(hit_test(area, 2, 1, &dashboard, &tui), Hit::NavLabel(0));
        assert_eq!(hit_test(area, 0, 2, &dashboard, &tui), Hit::Nothing);

        // Timeline starts at row 3; track line is row 3 + 3, join at column 2 + 20.
        assert_eq!(
            hit_test(area, 22, 6, &dashboard, &tui),
            Hit::Marker(HoverTarget {
                participant_id: "p1".to_string(),
                marker: MarkerId::Join,
            })
        );
    }
}
