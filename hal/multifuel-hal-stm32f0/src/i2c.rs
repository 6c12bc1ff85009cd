//! I2C bus driver for STM32F0
//!
//! The display controller is the bus master. Any blocking `embedded-hal`
//! 1.0 master works; on the display board it is embassy's `I2c` in
//! blocking mode.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use multifuel_hal::I2cBus;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Address not acknowledged
    AddressNack,
    /// Data byte not acknowledged
    DataNack,
    /// Overrun
    Overrun,
    /// Other error, including timeouts
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// [`I2cBus`] over a blocking `embedded-hal` master
///
/// `embedded-hal` transfers either fill the whole buffer or fail, so a
/// successful read always reports the full length.
pub struct BlockingI2c<T> {
    inner: T,
}

impl<T: I2c> BlockingI2c<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped master
    pub fn free(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for BlockingI2c<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))?;
        Ok(buf.len())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.inner
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))?;
        Ok(read_buf.len())
    }
}
