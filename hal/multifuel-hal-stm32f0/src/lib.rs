//! STM32F0-specific HAL for the Multifuel display controller
//!
//! Implements the `multifuel-hal` traits on top of embassy-stm32. Supported
//! chips:
//!
//! - STM32F042K6 (display board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware creates the embassy peripherals and wraps them:
//!
//! - [`i2c::BlockingI2c`] around any `embedded-hal` 1.0 I2C master
//! - [`gpio::Button`] / [`gpio::LcdPin`] around embassy GPIO
//! - [`flash::FlashStore`] on the last two flash pages
//! - [`backlight::PwmBacklight`] around four PWM channels
//! - [`time::EmbassyClock`] over `embassy-time`

#![no_std]

pub mod backlight;
pub mod flash;
pub mod gpio;
pub mod i2c;
pub mod time;

pub use backlight::PwmBacklight;
pub use flash::FlashStore;
pub use gpio::{Button, LcdPin};
pub use i2c::{BlockingI2c, I2cBusError};
pub use time::EmbassyClock;
