//! Clock over embassy-time

use embassy_time::{block_for, Duration, Instant};
use multifuel_hal::Clock;

/// Millisecond clock backed by the embassy time driver
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Wraps after ~49 days; callers use wrapping arithmetic
        Instant::now().as_millis() as u32
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
