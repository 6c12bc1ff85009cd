//! HD44780 character LCD driver
//!
//! 4-bit parallel interface, write-only (R/W tied low), 20x4 geometry.
//! Busy flag cannot be read, so every command waits its worst-case time.

use embassy_time::{block_for, Duration};
use multifuel_display::backend::check_bounds;
use multifuel_display::{DisplayBackend, DisplayError};
use multifuel_hal::OutputPin;

const COLS: u8 = 20;
const ROWS: u8 = 4;

/// DDRAM address of column 0 on each row
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// Pins of the 4-bit bus
pub struct LcdBus<P> {
    pub rs: P,
    pub en: P,
    pub d4: P,
    pub d5: P,
    pub d6: P,
    pub d7: P,
}

/// HD44780 driver
pub struct Hd44780<P> {
    bus: LcdBus<P>,
    initialized: bool,
}

fn delay_us(us: u64) {
    block_for(Duration::from_micros(us));
}

impl<P: OutputPin> Hd44780<P> {
    pub fn new(bus: LcdBus<P>) -> Self {
        Self {
            bus,
            initialized: false,
        }
    }

    /// Run the 4-bit initialisation sequence
    pub fn init(&mut self) {
        self.bus.rs.set_low();
        self.bus.en.set_low();
        // Power-on settle
        delay_us(50_000);

        // Three 8-bit function sets, then switch to 4-bit
        self.write_nibble(0x3);
        delay_us(4_500);
        self.write_nibble(0x3);
        delay_us(150);
        self.write_nibble(0x3);
        delay_us(150);
        self.write_nibble(0x2);
        delay_us(150);

        self.command(cmd::FUNCTION_4BIT_2LINE);
        self.command(cmd::DISPLAY_ON);
        self.command(cmd::CLEAR);
        delay_us(2_000);
        self.command(cmd::ENTRY_MODE_INCREMENT);

        self.initialized = true;
    }

    fn pulse_enable(&mut self) {
        self.bus.en.set_high();
        delay_us(1);
        self.bus.en.set_low();
        delay_us(50);
    }

    fn write_nibble(&mut self, nibble: u8) {
        self.bus.d4.set_state(nibble & 0x01 != 0);
        self.bus.d5.set_state(nibble & 0x02 != 0);
        self.bus.d6.set_state(nibble & 0x04 != 0);
        self.bus.d7.set_state(nibble & 0x08 != 0);
        self.pulse_enable();
    }

    fn write_byte(&mut self, byte: u8, data: bool) {
        self.bus.rs.set_state(data);
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn command(&mut self, command: u8) {
        self.write_byte(command, false);
    }

    fn ready(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<P: OutputPin> DisplayBackend for Hd44780<P> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ready()?;
        self.command(cmd::CLEAR);
        delay_us(2_000);
        Ok(())
    }

    fn write_at(&mut self, row: u8, col: u8, text: &[u8]) -> Result<(), DisplayError> {
        self.ready()?;
        check_bounds(self.dimensions(), row, col, text.len())?;
        self.set_cursor(row, col)?;
        for &byte in text {
            self.write_byte(byte, true);
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.ready()?;
        check_bounds(self.dimensions(), row, col, 0)?;
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col));
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
