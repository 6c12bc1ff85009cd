//! Fixed-width field formatting
//!
//! Every field has a width it must never exceed. Values are clamped to the
//! largest magnitude that fits before they are formatted, so a reading is
//! never cut off mid-digit.

use core::fmt::Write;

use heapless::String;
use multifuel_display::{Line, BLANK_LINE, SCREEN_COLS};

/// Range of a 4-character one-decimal field (`99.9`)
pub const TENTHS_4: (f32, f32) = (-9.9, 99.9);
/// Range of a 5-character one-decimal field (`999.9`)
pub const TENTHS_5: (f32, f32) = (-99.9, 999.9);
/// Range of a 2-character integer field
pub const WHOLE_2: (f32, f32) = (-9.0, 99.0);
/// Range of a 3-character integer field
pub const WHOLE_3: (f32, f32) = (-99.0, 999.0);
/// Range of a 4-character integer field (`9999`)
pub const WHOLE_4: (f32, f32) = (-999.0, 9999.0);

/// Padding for integer fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
    Zero,
    Space,
}

/// Snap values that would print as `-0…` to positive zero
///
/// The check runs on the formatted digits, so a value that rounds to zero
/// at exactly half of the last printed digit is caught too.
pub fn pos_zero(value: f32, precision: u8) -> f32 {
    if !value.is_sign_negative() {
        return value;
    }
    let mut digits: String<32> = String::new();
    if write!(digits, "{:.*}", precision as usize, value).is_err() {
        return value;
    }
    if digits.bytes().all(|b| matches!(b, b'-' | b'0' | b'.')) {
        0.0
    } else {
        value
    }
}

fn bounded(value: f32, (low, high): (f32, f32)) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(low, high)
    }
}

/// Writes into a 20-character row, overwriting from a column onwards
///
/// Anything past the last column is dropped.
pub struct LineWriter {
    line: Line,
    pos: usize,
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineWriter {
    /// Start from a row of spaces
    pub fn new() -> Self {
        Self {
            line: BLANK_LINE,
            pos: 0,
        }
    }

    /// Move the write position
    pub fn at(&mut self, col: usize) -> &mut Self {
        self.pos = col;
        self
    }

    pub fn push(&mut self, byte: u8) -> &mut Self {
        if self.pos < SCREEN_COLS {
            self.line[self.pos] = byte;
            self.pos += 1;
        }
        self
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            self.push(byte);
        }
        self
    }

    /// Zero-padded value with a fixed number of decimals (`%0W.Pf`)
    pub fn decimal(&mut self, value: f32, width: usize, precision: usize, range: (f32, f32)) -> &mut Self {
        let value = pos_zero(bounded(value, range), precision as u8);
        let _ = write!(self, "{:0width$.precision$}", value);
        self
    }

    /// Rounded integer (`%0Wd` or `%Wd`)
    pub fn integer(&mut self, value: f32, width: usize, pad: Pad, range: (f32, f32)) -> &mut Self {
        let value = pos_zero(bounded(value, range), 0);
        let _ = match pad {
            Pad::Zero => write!(self, "{:0width$.0}", value),
            Pad::Space => write!(self, "{:>width$.0}", value),
        };
        self
    }

    pub fn finish(&self) -> Line {
        self.line
    }
}

impl Write for LineWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}
