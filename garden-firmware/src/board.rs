//! Board wiring
//!
//! Pin map of the garden controller board and the concrete driver types
//! built on it.

use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::gpio::Output;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{FLASH, I2C1};
use embassy_rp::pwm::PwmOutput;

use garden_core::traits::Bootloader;
use garden_core::Controller;
use garden_drivers::{LightActuator, SectorStore, Ssd1306};

/// 2 MiB QSPI flash
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// 25000 counts per period, 5 kHz at the 125 MHz system clock
pub const PWM_TOP: u16 = 24_999;

pub const I2C_FREQUENCY: u32 = 400_000;

pub type BoardFlash = Flash<'static, FLASH, Blocking, FLASH_SIZE>;
pub type BoardActuator = LightActuator<PwmOutput<'static>, PwmOutput<'static>, Output<'static>>;
pub type BoardDisplay = Ssd1306<I2c<'static, I2C1, i2c::Blocking>>;
pub type BoardStore = SectorStore<BoardFlash>;
pub type BoardController = Controller<BoardActuator, BoardDisplay, BoardStore, RomBootloader>;

/// USB mass-storage bootloader in the RP2040 boot ROM
pub struct RomBootloader;

impl Bootloader for RomBootloader {
    fn enter_flash_mode(&mut self) {
        // no activity LED, both USB interfaces enabled
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
    }
}
