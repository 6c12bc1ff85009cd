//! Per-screen state received from the primary controller
//!
//! Both stores hold one record per screen, indexed by [`ScreenId`]. Records
//! are created once at startup and overwritten in place.
//!
//! [`ScreenId`]: crate::catalog::ScreenId

pub mod settings;
pub mod source;

pub use settings::{SettingsRecord, SettingsStore};
pub use source::{SourceState, SourceStore, SummaryStats};
