//! Refresh scheduler
//!
//! Rate-limits repaints and drives the cursor blink from one millisecond
//! clock. Nothing here blocks; each poll does at most one step of work.

pub mod refresh;

pub use refresh::{Interval, RefreshScheduler, RepaintStep};
