//! Multifuel Display Firmware
//!
//! Firmware for the Multifuel front panel (STM32F042K6): a 20x4 HD44780
//! character LCD, an RGB backlight, four buttons and a rotary encoder.
//! Talks to the primary controller as I2C master.
//!
//! One cooperative loop drives the UI; a second task samples the encoder
//! so no edge is missed while the loop is busy on the bus.

#![no_std]
#![no_main]

mod encoder;
mod hd44780;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::flash::Flash;
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::time::khz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::low_level::CountingMode;
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::{AtomicI32, Ordering};
use {defmt_rtt as _, panic_probe as _};

use crate::encoder::Encoder;
use crate::hd44780::{Hd44780, LcdBus};
use multifuel_core::{Controller, UiConfig};
use multifuel_display::InputSource;
use multifuel_display::PanelInput;
use multifuel_hal_stm32f0::{BlockingI2c, Button, EmbassyClock, FlashStore, LcdPin, PwmBacklight};

/// Encoder ticks not yet consumed by the UI loop
static ENCODER_TICKS: AtomicI32 = AtomicI32::new(0);

/// Encoder sample period
const ENCODER_SAMPLE_MS: u64 = 1;

/// UI loop period
const LOOP_MS: u64 = 2;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Multifuel display firmware starting...");

    let p = embassy_stm32::init(Default::default());

    // Primary controller link (PB6=SCL, PB7=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.timeout = Duration::from_millis(10);
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config);

    // LCD 4-bit bus (PA0=RS, PA1=EN, PA2..PA5=D4..D7)
    let mut lcd = Hd44780::new(LcdBus {
        rs: LcdPin::new(Output::new(p.PA0, Level::Low, Speed::Low)),
        en: LcdPin::new(Output::new(p.PA1, Level::Low, Speed::Low)),
        d4: LcdPin::new(Output::new(p.PA2, Level::Low, Speed::Low)),
        d5: LcdPin::new(Output::new(p.PA3, Level::Low, Speed::Low)),
        d6: LcdPin::new(Output::new(p.PA4, Level::Low, Speed::Low)),
        d7: LcdPin::new(Output::new(p.PA5, Level::Low, Speed::Low)),
    });
    lcd.init();
    info!("LCD initialized");

    // Backlight R/G/B and contrast on TIM3 CH1..CH4 (PA6, PA7, PB0, PB1)
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PA6, OutputType::PushPull)),
        Some(PwmPin::new(p.PA7, OutputType::PushPull)),
        Some(PwmPin::new(p.PB0, OutputType::PushPull)),
        Some(PwmPin::new(p.PB1, OutputType::PushPull)),
        khz(1),
        CountingMode::EdgeAlignedUp,
    );
    let mut channels = pwm.split();
    channels.ch1.enable();
    channels.ch2.enable();
    channels.ch3.enable();
    channels.ch4.enable();
    let backlight = PwmBacklight::new(channels.ch1, channels.ch2, channels.ch3, channels.ch4);

    // Buttons (PA8=left, PA9=right, PA10=menu, PA15=select), active low
    let mut panel = PanelInput::new(
        Button::new(Input::new(p.PA8, Pull::Up)),
        Button::new(Input::new(p.PA9, Pull::Up)),
        Button::new(Input::new(p.PA10, Pull::Up)),
        Button::new(Input::new(p.PA15, Pull::Up)),
    );

    // Encoder phases (PB3=A, PB4=B)
    let encoder = Encoder::new(Input::new(p.PB3, Pull::Up), Input::new(p.PB4, Pull::Up));

    let store = FlashStore::load(Flash::new_blocking(p.FLASH)).await;

    let Ok(mut controller) = Controller::new(
        BlockingI2c::new(i2c),
        lcd,
        store,
        backlight,
        UiConfig::default(),
    ) else {
        defmt::panic!("Invalid UI configuration");
    };

    let mut clock = EmbassyClock;
    if controller.startup(&mut clock) {
        info!("Primary controller found");
    } else {
        warn!("Starting without primary controller");
    }

    unwrap!(spawner.spawn(encoder_task(encoder)));

    loop {
        let now = Instant::now().as_millis() as u32;

        panel.add_encoder_ticks(ENCODER_TICKS.swap(0, Ordering::Relaxed));
        while let Some(event) = panel.poll(now) {
            controller.handle_input(event);
        }
        controller.poll(now);

        if controller.store().is_dirty() {
            if let Err(e) = controller.store_mut().sync().await {
                warn!("Preference write failed: {}", e);
            }
        }

        Timer::after_millis(LOOP_MS).await;
    }
}

/// Encoder sampling task
#[embassy_executor::task]
async fn encoder_task(mut encoder: Encoder<'static>) {
    info!("Encoder task started");

    loop {
        let tick = encoder.sample();
        if tick != 0 {
            ENCODER_TICKS.fetch_add(tick as i32, Ordering::Relaxed);
        }
        Timer::after_millis(ENCODER_SAMPLE_MS).await;
    }
}
