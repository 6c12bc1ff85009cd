//! Configuration types
//!
//! `UiConfig` is fixed at build time; `DisplayPrefs` survive power cycles in
//! the preference store.

pub mod prefs;
pub mod types;

pub use prefs::*;
pub use types::*;
