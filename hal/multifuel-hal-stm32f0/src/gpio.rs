//! GPIO wrappers for STM32F0

use embassy_stm32::gpio::{Input, Output};
use multifuel_hal::{InputPin, OutputPin};

/// Front-panel button or encoder phase input
pub struct Button<'d>(Input<'d>);

impl<'d> Button<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self(input)
    }
}

impl InputPin for Button<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// LCD bus line
pub struct LcdPin<'d>(Output<'d>);

impl<'d> LcdPin<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for LcdPin<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}
