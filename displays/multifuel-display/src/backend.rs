//! Display backend trait
//!
//! Defines the interface of a character display. Controller-specific details
//! such as DDRAM addressing stay in the implementation.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Character display backend
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write character codes starting at the given row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Display character codes
    fn write_at(&mut self, row: u8, col: u8, text: &[u8]) -> Result<(), DisplayError>;

    /// Move the hardware cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

/// Check that `len` characters at (`row`, `col`) fit on a display of the
/// given (columns, rows) dimensions
pub fn check_bounds(
    dimensions: (u8, u8),
    row: u8,
    col: u8,
    len: usize,
) -> Result<(), DisplayError> {
    let (cols, rows) = dimensions;
    if row >= rows || col as usize + len > cols as usize {
        return Err(DisplayError::InvalidCoordinates);
    }
    Ok(())
}
