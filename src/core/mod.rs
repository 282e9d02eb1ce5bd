//! # Core Application Logic
//!
//! The dashboard's data model and arithmetic. It knows nothing about any
//! specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Meeting (typed data) │
//!                    │  • Geometry (layout)    │
//!                    │  • Dashboard + update() │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`clock`]: timestamp parsing, `HH:mm` labels, duration label
//! - [`geometry`]: session axis and per-participant layout
//! - [`meeting`]: the typed data model
//! - [`source`]: loading and validating meeting JSON
//! - [`config`]: layered configuration
//! - [`state`]: the `Dashboard` struct
//! - [`action`]: the `Action` enum and `update()` reducer

pub mod action;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod meeting;
pub mod source;
pub mod state;
