//! Multifuel Display Protocol
//!
//! This crate defines the I2C protocol between the display controller (bus
//! master) and the primary controller of the power unit. Every exchange is a
//! fixed 5-byte command frame, optionally followed by a fixed-length read
//! whose size is implied by the command code.
//!
//! # Frame Overview
//!
//! ```text
//! ┌─────────┬───────────────────────────┐
//! │ COMMAND │ PAYLOAD                   │
//! │ 1B      │ 4B (unused bytes are 0)   │
//! └─────────┴───────────────────────────┘
//! ```
//!
//! | Code | Command           | Response            |
//! |------|-------------------|---------------------|
//! | 123  | `GET_CONFIG`      | 4 bytes             |
//! | 131  | `GET_SOURCE`      | 12 bytes            |
//! | 142  | `GET_SETTINGS`    | 4 bytes             |
//! | 150  | `GET_SCREEN`      | 20 bytes (one row)  |
//! | 169  | `SEND_INPUT_DATA` | none                |
//! | 172  | `SEND_SETTINGS`   | none                |
//!
//! There is no checksum or length byte; a short read is detected by the
//! byte count the bus reports.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod status;

pub use frame::{Command, CommandFrame, FrameError, FRAME_LEN, PAYLOAD_LEN, ROW_LEN};
pub use messages::{Request, SettingsPayload, SourcePayload, UiPayload};
pub use status::SourceStatus;
