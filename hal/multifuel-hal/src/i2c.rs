//! I2C bus abstractions
//!
//! The display controller is the bus master; the primary controller answers
//! at a fixed 7-bit address.

/// I2C bus master
///
/// Reads report how many bytes actually arrived so callers can tell a
/// short response from a complete one.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// A zero-length write is an address-only ping: it succeeds exactly
    /// when a device acknowledges the address.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// Returns the number of bytes received into `buf`.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write a request then read its response in one transaction
    ///
    /// Returns the number of response bytes received into `read_buf`.
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<usize, Self::Error>;

    /// Ping the device at `address`
    fn ping(&mut self, address: u8) -> bool {
        self.write(address, &[]).is_ok()
    }
}
