//! Repaint and blink timers

use multifuel_display::SCREEN_ROWS;

/// Periodic deadline on a wrapping millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    period_ms: u32,
    last_ms: Option<u32>,
}

impl Interval {
    /// Create an interval that is due on the first check
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Check if a full period has elapsed since the last reset
    pub fn due(&self, now_ms: u32) -> bool {
        match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.period_ms,
        }
    }

    /// Check if a period has been started
    pub fn is_started(&self) -> bool {
        self.last_ms.is_some()
    }

    /// Start a new period at `now_ms`
    pub fn reset(&mut self, now_ms: u32) {
        self.last_ms = Some(now_ms);
    }

    /// Reset and return true when due
    pub fn fire(&mut self, now_ms: u32) -> bool {
        if self.due(now_ms) {
            self.reset(now_ms);
            true
        } else {
            false
        }
    }
}

/// One step of a repaint cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RepaintStep {
    /// Rebuild the frame; `clear` when the screen or mode changed
    Begin { clear: bool },
    /// Write one row to the display
    Row(u8),
}

/// Repaint and blink scheduling
///
/// A repaint cycle is `Begin` followed by one `Row` per display row, one
/// step per poll, so a full refresh never stalls input handling. A forced
/// repaint restarts the cycle at once, ignoring the interval.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    repaint: Interval,
    blink: Interval,
    /// Next row of the running cycle
    next_row: Option<u8>,
    force: bool,
}

impl RefreshScheduler {
    pub const fn new(repaint_ms: u32, blink_ms: u32) -> Self {
        Self {
            repaint: Interval::new(repaint_ms),
            blink: Interval::new(blink_ms),
            next_row: None,
            force: false,
        }
    }

    /// Repaint everything on the next poll
    pub fn request_force(&mut self) {
        self.force = true;
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }

    /// Check if a repaint cycle is part way through
    pub fn in_cycle(&self) -> bool {
        self.next_row.is_some()
    }

    /// Next repaint step, if any work is due
    pub fn poll_repaint(&mut self, now_ms: u32) -> Option<RepaintStep> {
        if self.force {
            self.force = false;
            self.repaint.reset(now_ms);
            self.next_row = Some(0);
            return Some(RepaintStep::Begin { clear: true });
        }

        if let Some(row) = self.next_row {
            self.next_row = (row + 1 < SCREEN_ROWS as u8).then_some(row + 1);
            return Some(RepaintStep::Row(row));
        }

        if self.repaint.fire(now_ms) {
            self.next_row = Some(0);
            return Some(RepaintStep::Begin { clear: false });
        }

        None
    }

    /// Check if the cursor should flip its blink phase
    ///
    /// The blink timer restarts while blinking is disabled, so the first
    /// flip after enabling comes a full period later.
    pub fn poll_blink(&mut self, now_ms: u32, enabled: bool) -> bool {
        if !enabled || !self.blink.is_started() {
            self.blink.reset(now_ms);
            return false;
        }
        self.blink.fire(now_ms)
    }
}
