//! UI rendering module for postpeek
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod help_overlay;
pub mod input;
pub mod post_detail;
pub mod stats;

pub use help_overlay::render as render_help_overlay;
pub use input::render as render_input;
pub use post_detail::render as render_post_detail;
