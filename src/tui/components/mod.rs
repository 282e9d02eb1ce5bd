//! # TUI Components
//!
//! All UI components for the dashboard.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `HeaderBar`: title and the show-timeline switch
//! - `ParticipantRow`: one participant's labels, tooltip line and track
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it
//! each frame:
//! - `NavBar` / `NavBarState`: scrollable per-minute label strip
//! - `Timeline` / `TimelineState`: scrollable participant list with hover
//!
//! `track` is not a component. It rasterizes a participant layout into
//! terminal cells for both drawing and hit testing.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── header.rs           (top bar + switch)
//! ├── nav_bar.rs          (time label strip)
//! ├── participant_row.rs  (single row renderer)
//! ├── timeline.rs         (row list, hover state, hit testing)
//! └── track.rs            (layout → cells)
//! ```

pub mod header;
pub mod nav_bar;
pub mod participant_row;
pub mod timeline;
pub mod track;

pub use header::HeaderBar;
pub use nav_bar::{NavBar, NavBarState};
pub use participant_row::ParticipantRow;
pub use timeline::{HoverTarget, Timeline, TimelineState};
