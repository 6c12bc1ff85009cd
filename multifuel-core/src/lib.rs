//! Board-agnostic UI logic for the Multifuel display controller
//!
//! This crate contains everything between the front panel and the bus that
//! does not depend on a specific chip:
//!
//! - Screen catalog (static templates per power source)
//! - Source telemetry and settings stores
//! - Protocol client for the primary controller
//! - Navigation and editing state machine
//! - Fixed-width line renderer
//! - Refresh scheduler (rate-limited repaint, cursor blink)
//! - UI configuration and persisted display preferences
//! - The `Controller` tying them into one cooperative loop step

#![no_std]
#![deny(unsafe_code)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod nav;
pub mod render;
pub mod scheduler;
pub mod state;

#[cfg(any(test, feature = "std"))]
pub mod testing;

pub use catalog::{LineType, ScreenId};
pub use client::ProtocolClient;
pub use config::{DisplayPrefs, UiConfig};
pub use controller::Controller;
pub use nav::{NavigationState, UiMode};
