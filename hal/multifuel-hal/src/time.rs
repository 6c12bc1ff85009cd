//! Time source abstraction
//!
//! The UI loop only needs a wrapping millisecond counter and a blocking
//! delay for the startup handshake. Tests drive it by hand.

/// Millisecond clock
pub trait Clock {
    /// Milliseconds since boot, wrapping at `u32::MAX`
    fn now_ms(&self) -> u32;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Milliseconds elapsed since `since`, tolerant of counter wrap
    fn elapsed_since(&self, since: u32) -> u32 {
        self.now_ms().wrapping_sub(since)
    }
}
