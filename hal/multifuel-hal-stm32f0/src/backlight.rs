//! PWM backlight and contrast for STM32F0
//!
//! Each output is an `embedded-hal` duty-cycle channel; embassy's
//! `SimplePwm` channels implement it.

use embedded_hal::pwm::SetDutyCycle;
use multifuel_hal::{BacklightDriver, Rgb};

/// RGB backlight plus the LCD contrast (V0) output
pub struct PwmBacklight<R, G, B, C> {
    red: R,
    green: G,
    blue: B,
    contrast: C,
}

impl<R, G, B, C> PwmBacklight<R, G, B, C>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    C: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B, contrast: C) -> Self {
        Self {
            red,
            green,
            blue,
            contrast,
        }
    }
}

fn set_duty<P: SetDutyCycle>(channel: &mut P, duty: u8) {
    if channel
        .set_duty_cycle_fraction(duty as u16, u8::MAX as u16)
        .is_err()
    {
        #[cfg(feature = "defmt")]
        defmt::warn!("PWM duty {} rejected", duty);
    }
}

impl<R, G, B, C> BacklightDriver for PwmBacklight<R, G, B, C>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
    C: SetDutyCycle,
{
    fn set_rgb(&mut self, color: Rgb) {
        set_duty(&mut self.red, color.r);
        set_duty(&mut self.green, color.g);
        set_duty(&mut self.blue, color.b);
    }

    fn set_contrast(&mut self, duty: u8) {
        set_duty(&mut self.contrast, duty);
    }
}
