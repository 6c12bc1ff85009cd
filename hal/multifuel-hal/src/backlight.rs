//! Backlight and contrast output
//!
//! Duty cycles are 8-bit; the chip HAL maps them onto its PWM timers.

/// RGB duty triple for the backlight LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All channels off
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Backlight and contrast PWM collaborator
pub trait BacklightDriver {
    /// Drive the RGB backlight channels
    fn set_rgb(&mut self, color: Rgb);

    /// Drive the LCD contrast (V0) duty
    fn set_contrast(&mut self, duty: u8);
}
