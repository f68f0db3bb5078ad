//! Garden - Grow Light & Irrigation Controller Firmware
//!
//! Main firmware binary for the RP2040 garden controller board: two PWM
//! LED channels, a pump relay, an SSD1306 OLED and a rotary encoder with
//! push button.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use garden_core::{Controller, Devices};
use garden_drivers::{LightActuator, SectorStore, Ssd1306};

mod board;
mod channels;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Garden firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Light outputs on PWM slice 6: A = GPIO28 (blue), B = GPIO29 (white/red)
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = board::PWM_TOP;
    let pwm = Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_28, p.PIN_29, pwm_config);
    let (blue, white_red) = pwm.split();
    let pump = Output::new(p.PIN_27, Level::Low);
    let mut actuator = LightActuator::new(unwrap!(white_red), unwrap!(blue), pump);
    if actuator.take_fault() {
        warn!("Output stage rejected the initial state");
    }
    info!("PWM and pump initialized");

    // OLED on I2C1: SDA = GPIO2, SCL = GPIO3
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::I2C_FREQUENCY;
    let bus = I2c::new_blocking(p.I2C1, p.PIN_3, p.PIN_2, i2c_config);
    let mut display = Ssd1306::new(bus);
    match display.init() {
        Ok(()) => info!("Display initialized"),
        Err(e) => warn!("Display init failed: {:?}", e),
    }

    // Profiles live in the last flash sector
    let flash: board::BoardFlash = Flash::new_blocking(p.FLASH);
    let store = unwrap!(SectorStore::last_sector(flash));
    info!("Profile store at flash offset {=u32:#x}", store.base());

    let encoder_a = Input::new(p.PIN_4, Pull::Up);
    let encoder_b = Input::new(p.PIN_5, Pull::Up);
    let button = Input::new(p.PIN_6, Pull::Up);

    let controller = Controller::new(
        config::CONTROLLER_CONFIG,
        Devices {
            actuator,
            display,
            store,
            bootloader: board::RomBootloader,
        },
        Instant::now().as_millis(),
    );
    if controller.restored_from_storage() {
        info!("Profiles restored from flash");
    } else {
        info!("No saved profiles, using factory defaults");
    }
    info!("Active profile: {}", controller.profiles().active().name.as_str());

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::tick_task()));
    spawner.spawn(unwrap!(tasks::input_task(encoder_a, encoder_b, button)));
    spawner.spawn(unwrap!(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");
}
