//! Navigation and editing state machine
//!
//! Button and encoder events move the UI between browsing, picking a
//! setting and editing it. Transitions are pure; anything that needs the
//! bus or the display is returned as an [`Effect`] for the controller.

pub mod edit;
pub mod machine;

pub use edit::{clamp_step, wrap_step, EditTarget, UnitFlag};
pub use machine::{Effect, NavigationState, UiMode};
