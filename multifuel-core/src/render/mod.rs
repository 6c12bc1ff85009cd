//! Screen rendering
//!
//! Turns a screen template plus the current stores into four fixed-width
//! rows of display character codes.

pub mod format;
pub mod lines;

pub use format::{pos_zero, LineWriter, Pad};
pub use lines::{render_line, render_row, render_screen, render_startup, status_text, RenderContext};
