//! Screen buffer types
//!
//! A 4x20 frame of display character codes. Rows are tracked dirty
//! individually so a repaint can be spread over several loop iterations,
//! one row at a time.

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the display
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns on the display
pub const SCREEN_COLS: usize = multifuel_protocol::ROW_LEN;

/// One row of display character codes
pub type Line = [u8; SCREEN_COLS];

/// A row of spaces
pub const BLANK_LINE: Line = [b' '; SCREEN_COLS];

/// HD44780 ROM code for the degree sign
pub const DEGREE: u8 = 0xDF;

/// HD44780 ROM code for the right arrow
pub const ARROW: u8 = 0x7E;

/// Frame buffer for the character display
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [Line; SCREEN_ROWS],
    /// Bit `n` set when row `n` differs from what the display shows
    dirty: u8,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    const ALL_ROWS: u8 = (1 << SCREEN_ROWS) - 1;

    /// Create a blank screen with every row dirty
    pub fn new() -> Self {
        Self {
            lines: [BLANK_LINE; SCREEN_ROWS],
            dirty: Self::ALL_ROWS,
        }
    }

    /// Blank every row
    pub fn clear(&mut self) {
        self.lines = [BLANK_LINE; SCREEN_ROWS];
        self.dirty = Self::ALL_ROWS;
    }

    /// Replace the content of a row
    pub fn set_line(&mut self, row: usize, line: &Line) {
        if let Some(dest) = self.lines.get_mut(row) {
            if dest != line {
                *dest = *line;
                self.dirty |= 1 << row;
            }
        }
    }

    /// Write `text` into a row starting at `col`, truncating at the edge
    pub fn set_text(&mut self, row: usize, col: usize, text: &[u8]) {
        let Some(dest) = self.lines.get_mut(row) else {
            return;
        };
        if col >= SCREEN_COLS {
            return;
        }
        let len = text.len().min(SCREEN_COLS - col);
        if dest[col..col + len] != text[..len] {
            dest[col..col + len].copy_from_slice(&text[..len]);
            self.dirty |= 1 << row;
        }
    }

    /// Copy the non-zero bytes of `bytes` over a row
    ///
    /// Zero bytes stand for characters the sender never transmitted, so
    /// they keep whatever the row held before. Returns the number of bytes
    /// applied.
    pub fn overlay(&mut self, row: usize, bytes: &[u8]) -> usize {
        let Some(dest) = self.lines.get_mut(row) else {
            return 0;
        };
        let mut applied = 0;
        for (cell, &byte) in dest.iter_mut().zip(bytes) {
            if byte != 0 {
                if *cell != byte {
                    self.dirty |= 1 << row;
                }
                *cell = byte;
                applied += 1;
            }
        }
        applied
    }

    /// Get the content of a row
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Get all rows
    pub fn lines(&self) -> &[Line; SCREEN_ROWS] {
        &self.lines
    }

    /// Check if a row needs redrawing
    pub fn is_row_dirty(&self, row: usize) -> bool {
        row < SCREEN_ROWS && self.dirty & (1 << row) != 0
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Mark every row dirty, e.g. after the display was cleared
    pub fn mark_dirty(&mut self) {
        self.dirty = Self::ALL_ROWS;
    }

    /// Send one row to the display and mark it clean
    pub fn flush_row<D: DisplayBackend>(
        &mut self,
        row: usize,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        let line = self.lines.get(row).ok_or(DisplayError::InvalidCoordinates)?;
        display.write_at(row as u8, 0, line)?;
        self.dirty &= !(1 << row);
        Ok(())
    }

    /// Send every dirty row to the display
    pub fn flush<D: DisplayBackend>(&mut self, display: &mut D) -> Result<(), DisplayError> {
        for row in 0..SCREEN_ROWS {
            if self.is_row_dirty(row) {
                self.flush_row(row, display)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{=[u8]:a}", line.as_slice());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &[u8]) -> Line {
        let mut line = BLANK_LINE;
        line[..text.len()].copy_from_slice(text);
        line
    }

    #[derive(Default)]
    struct Rows {
        written: [Option<Line>; SCREEN_ROWS],
    }

    impl DisplayBackend for Rows {
        fn clear(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn write_at(&mut self, row: u8, col: u8, text: &[u8]) -> Result<(), DisplayError> {
            let mut dest = self.written[row as usize].unwrap_or(BLANK_LINE);
            dest[col as usize..col as usize + text.len()].copy_from_slice(text);
            self.written[row as usize] = Some(dest);
            Ok(())
        }

        fn set_cursor(&mut self, _row: u8, _col: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_new_screen_is_blank_and_dirty() {
        let screen = Screen::new();
        assert!(screen.is_dirty());
        assert_eq!(screen.line(0), Some(&BLANK_LINE));
        assert_eq!(screen.line(4), None);
    }

    #[test]
    fn test_overlay_keeps_bytes_under_zeros() {
        let mut screen = Screen::new();
        screen.set_line(1, &line(b"Status: enabled"));

        let mut partial = [0u8; SCREEN_COLS];
        partial[..7].copy_from_slice(b"STATUS:");
        let applied = screen.overlay(1, &partial);

        assert_eq!(applied, 7);
        assert_eq!(screen.line(1), Some(&line(b"STATUS: enabled")));
    }

    #[test]
    fn test_overlay_short_response() {
        let mut screen = Screen::new();
        screen.set_line(2, &line(b"abcdef"));
        assert_eq!(screen.overlay(2, b"XY"), 2);
        assert_eq!(screen.line(2), Some(&line(b"XYcdef")));
    }

    #[test]
    fn test_set_text_truncates_at_edge() {
        let mut screen = Screen::new();
        screen.set_text(0, 18, b"ONOFF");
        assert_eq!(&screen.line(0).unwrap()[18..], b"ON");
    }

    #[test]
    fn test_flush_row_cleans_only_that_row() {
        let mut screen = Screen::new();
        let mut display = Rows::default();

        screen.flush_row(2, &mut display).unwrap();
        assert!(!screen.is_row_dirty(2));
        assert!(screen.is_row_dirty(0));
        assert_eq!(display.written[2], Some(BLANK_LINE));
        assert_eq!(display.written[0], None);
    }

    #[test]
    fn test_unchanged_line_stays_clean() {
        let mut screen = Screen::new();
        let mut display = Rows::default();
        screen.flush(&mut display).unwrap();

        screen.set_line(0, &BLANK_LINE);
        assert!(!screen.is_dirty());

        screen.set_line(0, &line(b"x"));
        assert!(screen.is_row_dirty(0));
    }
}
