//! # HeaderBar Component
//!
//! Top bar of the frame: the dashboard title on the left, the
//! "Show participant timeline" switch on the right.
//!
//! Purely presentational. The switch reflects `timeline_visible` and the
//! parent decides what a click on [`HeaderBar::switch_area`] means.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;
use crate::tui::theme;

pub const TITLE: &str = "Participants wise Session Timeline";
pub const SWITCH_LABEL: &str = "Show participant timeline";
const SWITCH_ON: &str = "[━━●]";
const SWITCH_OFF: &str = "[○━━]";
const SWITCH_WIDTH: u16 = 5;
const PADDING: u16 = 1;

pub struct HeaderBar {
    /// Whether the participant timeline is currently shown.
    pub timeline_visible: bool,
}

impl HeaderBar {
    pub fn new(timeline_visible: bool) -> Self {
        Self { timeline_visible }
    }

    /// Cells occupied by the switch glyph within the header area.
    pub fn switch_area(area: Rect) -> Rect {
        let x = area.right().saturating_sub(PADDING + SWITCH_WIDTH).max(area.x);
        Rect::new(x, area.y, SWITCH_WIDTH.min(area.width), area.height.min(1))
    }
}

impl Component for HeaderBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Block::default().style(Style::default().bg(theme::HEADER_BG)), area);

        let title = Line::from(vec![
            Span::raw(" ".repeat(PADDING as usize)),
            Span::styled("▤ ", Style::default().fg(theme::FG)),
            Span::styled(TITLE, Style::default().fg(theme::FG).add_modifier(Modifier::BOLD)),
        ]);
        frame.render_widget(Paragraph::new(title), area);

        let switch = Self::switch_area(area);
        let (glyph, switch_style) = if self.timeline_visible {
            (SWITCH_ON, Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        } else {
            (SWITCH_OFF, Style::default().fg(theme::DIM))
        };

        let label_area = Rect::new(area.x, area.y, switch.x.saturating_sub(area.x + 1), area.height.min(1));
        let label = Paragraph::new(Span::styled(SWITCH_LABEL, Style::default().fg(theme::MUTED)))
            .alignment(Alignment::Right);
        frame.render_widget(label, label_area);
        frame.render_widget(Span::styled(glyph, switch_style), switch);
    }
}
