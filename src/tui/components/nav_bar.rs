//! # NavBar Component
//!
//! Horizontally scrolling strip of per-minute time labels.
//!
//! Selection is local to this control: moving it never filters or scrolls
//! the timeline below. The strip scrolls just far enough to keep the
//! selected label on screen.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `NavBarState` lives in `TuiState`
//! - `NavBar` is created each frame with borrowed state and labels

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme;

/// Blank columns between adjacent labels.
const LABEL_GAP: u16 = 4;
/// Columns reserved on each side for the overflow arrows.
const EDGE: u16 = 2;

pub struct NavBarState {
    pub selected: usize,
    len: usize,
    first_visible: usize,
    /// `(start_x, end_x, index)` of each label drawn in the last frame.
    label_spans: Vec<(u16, u16, usize)>,
}

impl NavBarState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            len,
            first_visible: 0,
            label_spans: Vec::new(),
        }
    }

    pub fn select(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        let index = index.min(self.len - 1);
        if index != self.selected {
            debug!("Navigation tab selected: {}", index);
        }
        self.selected = index;
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Which label (if any) was drawn at screen column `x` in the last frame.
    pub fn label_at(&self, x: u16) -> Option<usize> {
        self.label_spans
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&x))
            .map(|(_, _, index)| *index)
    }

    /// How many labels starting at `first` fit into `available` columns.
    fn fitting(labels: &[String], first: usize, available: u16) -> usize {
        let mut used: u16 = 0;
        let mut count = 0;
        for label in &labels[first..] {
            let gap = if count == 0 { 0 } else { LABEL_GAP };
            let width = label.width() as u16 + gap;
            if used.saturating_add(width) > available {
                break;
            }
            used += width;
            count += 1;
        }
        count.max(1)
    }

    /// Shift the window so the selected label is visible.
    fn scroll_to_selected(&mut self, labels: &[String], available: u16) {
        if self.selected < self.first_visible {
            self.first_visible = self.selected;
        }
        while self.first_visible < self.selected
            && self.first_visible + Self::fitting(labels, self.first_visible, available) <= self.selected
        {
            self.first_visible += 1;
        }
    }
}

impl EventHandler for NavBarState {
    /// The newly selected label index.
    type Event = usize;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let before = self.selected;
        match event {
            TuiEvent::PrevTab => self.select(self.selected.saturating_sub(1)),
            TuiEvent::NextTab => self.select(self.selected + 1),
            _ => return None,
        }
        (self.selected != before).then_some(self.selected)
    }
}

pub struct NavBar<'a> {
    state: &'a mut NavBarState,
    labels: &'a [String],
}

impl<'a> NavBar<'a> {
    pub fn new(state: &'a mut NavBarState, labels: &'a [String]) -> Self {
        Self { state, labels }
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.label_spans.clear();
        if self.labels.is_empty() || area.width <= EDGE * 2 {
            return;
        }

        let available = area.width - EDGE * 2;
        self.state.scroll_to_selected(self.labels, available);
        let first = self.state.first_visible;
        let count = NavBarState::fitting(self.labels, first, available);

        let arrow_style = Style::default().fg(theme::DIM);
        let mut spans = vec![Span::styled(
            if first > 0 { "‹ " } else { "  " },
            arrow_style,
        )];

        let mut x = area.x + EDGE;
        for (index, label) in self.labels.iter().enumerate().skip(first).take(count) {
            if index > first {
                spans.push(Span::raw(" ".repeat(LABEL_GAP as usize)));
                x += LABEL_GAP;
            }
            let style = if index == self.state.selected {
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::DIM).add_modifier(Modifier::BOLD)
            };
            let width = label.width() as u16;
            self.state.label_spans.push((x, x + width, index));
            spans.push(Span::styled(label.as_str(), style));
            x += width;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);

        if first + count < self.labels.len() {
            let arrow = Rect::new(area.right() - 1, area.y, 1, 1);
            frame.render_widget(Span::styled("›", arrow_style), arrow);
        }
    }
}
