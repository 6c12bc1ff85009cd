//! Multifuel Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the display controller talks
//! to. Chip-specific crates implement them; host tests implement them with
//! in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  multifuel-core / multifuel-lcd-fw      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  multifuel-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ multifuel-hal-│
//!             │    stm32f0    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Request/response link to the primary controller
//! - [`store::ConfigStore`] - Byte-addressable preference storage
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`backlight::BacklightDriver`] - RGB backlight and contrast PWM
//! - [`time::Clock`] - Millisecond clock with blocking delay

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod gpio;
pub mod i2c;
pub mod store;
pub mod time;

// Re-export key traits at crate root for convenience
pub use backlight::{BacklightDriver, Rgb};
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use store::{ConfigStore, StorageKey};
pub use time::Clock;
