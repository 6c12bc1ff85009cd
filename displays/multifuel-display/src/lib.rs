//! Character display abstraction and front-panel input for Multifuel
//!
//! This crate provides:
//! - `DisplayBackend` trait for HD44780-class character displays
//! - `Screen`, a 4x20 frame buffer with per-row dirty tracking
//! - `InputSource` trait and `PanelInput`, turning four buttons and a
//!   quadrature encoder into `NavigationEvent`s
//!
//! # Character set
//!
//! Rows are raw display character codes, not UTF-8. The HD44780 ROM maps
//! `0xDF` to a degree sign and `0x7E` to a right arrow; see
//! [`screen::DEGREE`] and [`screen::ARROW`].

#![no_std]

pub mod backend;
pub mod input;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use input::{Debouncer, EncoderAccumulator, InputSource, NavigationEvent, PanelInput};
pub use screen::{Line, Screen, BLANK_LINE, SCREEN_COLS, SCREEN_ROWS};
