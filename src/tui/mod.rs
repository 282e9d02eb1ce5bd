//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the dashboard,
//! and translates keyboard and mouse events into core::Action values or
//! component-local state changes.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! Nothing on screen animates, so the loop sleeps up to 500ms waiting for
//! input and only redraws after an event or a terminal resize. All events
//! that are already queued are drained before the next draw.

mod component;
mod components;
mod event;
mod theme;
pub mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::state::Dashboard;
use crate::tui::component::EventHandler;
use crate::tui::components::{NavBarState, TimelineState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::Hit;

const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub nav: NavBarState,
    pub timeline: TimelineState,
}

impl TuiState {
    pub fn new(dashboard: &Dashboard) -> Self {
        Self {
            nav: NavBarState::new(dashboard.time_markers.len()),
            timeline: TimelineState::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

pub fn run(mut dashboard: Dashboard) -> std::io::Result<()> {
    let mut tui = TuiState::new(&dashboard);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut frame_area = Rect::default();
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| {
                frame_area = f.area();
                ui::draw_ui(f, &dashboard, &mut tui);
            })?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&event, frame_area, &mut dashboard, &mut tui) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Route one event to the core reducer or the component that owns it.
///
/// `frame_area` is the area of the last drawn frame; pointer positions are
/// hit tested against it.
pub fn handle_event(event: &TuiEvent, frame_area: Rect, dashboard: &mut Dashboard, tui: &mut TuiState) -> Effect {
    match event {
        TuiEvent::Quit => update(dashboard, Action::Quit),
        TuiEvent::ToggleTimeline => toggle_timeline(dashboard, tui),
        TuiEvent::PrevTab | TuiEvent::NextTab => {
            tui.nav.handle_event(event);
            Effect::None
        }
        TuiEvent::ScrollUp | TuiEvent::ScrollDown | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            if dashboard.timeline_visible {
                tui.timeline.handle_event(event);
            }
            Effect::None
        }
        TuiEvent::MouseMove(column, row) => {
            let target = match ui::hit_test(frame_area, *column, *row, dashboard, tui) {
                Hit::Marker(target) => Some(target),
                _ => None,
            };
            tui.timeline.track_pointer(target);
            Effect::None
        }
        TuiEvent::MouseClick(column, row) => match ui::hit_test(frame_area, *column, *row, dashboard, tui) {
            Hit::TimelineSwitch => toggle_timeline(dashboard, tui),
            Hit::NavLabel(index) => {
                tui.nav.select(index);
                Effect::None
            }
            Hit::Marker(_) | Hit::Nothing => Effect::None,
        },
        TuiEvent::Resize => {
            debug!("Terminal resized");
            Effect::None
        }
    }
}

fn toggle_timeline(dashboard: &mut Dashboard, tui: &mut TuiState) -> Effect {
    // A hidden timeline has no markers to hover.
    tui.timeline.track_pointer(None);
    update(dashboard, Action::ToggleTimeline)
}
