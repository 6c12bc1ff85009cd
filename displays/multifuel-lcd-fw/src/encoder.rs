//! Quadrature encoder sampler
//!
//! Decodes every edge of the A/B phases into a signed tick; a detent is
//! four ticks. Invalid jumps (both phases changed at once) count as zero.

use embassy_stm32::gpio::Input;

/// Tick for each (previous, current) phase pair, indexed `prev << 2 | cur`
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Quadrature decoder
pub struct Encoder<'d> {
    a: Input<'d>,
    b: Input<'d>,
    last: u8,
}

impl<'d> Encoder<'d> {
    /// Create a decoder at the current phase
    pub fn new(a: Input<'d>, b: Input<'d>) -> Self {
        let last = phase(a.is_high(), b.is_high());
        Self { a, b, last }
    }

    /// Sample both phases; returns -1, 0 or 1
    ///
    /// Must run faster than the fastest expected edge rate.
    pub fn sample(&mut self) -> i8 {
        let current = phase(self.a.is_high(), self.b.is_high());
        let tick = TRANSITIONS[((self.last << 2) | current) as usize];
        self.last = current;
        tick
    }
}

fn phase(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}
