//! # Actions
//!
//! Everything that can happen to the dashboard becomes an `Action`.
//! User flips the switch? That's `Action::ToggleTimeline`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an [`Effect`] for the adapter to carry out.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::info;

use crate::core::state::Dashboard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Flip the "show participant timeline" switch.
    ToggleTimeline,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(state: &mut Dashboard, action: Action) -> Effect {
    match action {
        Action::ToggleTimeline => {
            state.timeline_visible = !state.timeline_visible;
            info!("Timeline visible: {}", state.timeline_visible);
            state.status_message = if state.timeline_visible {
                String::new()
            } else {
                "Timeline hidden".to_string()
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
