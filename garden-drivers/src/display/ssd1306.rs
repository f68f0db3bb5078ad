//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Drawing goes to
//! an in-RAM frame buffer; `flush` sends it one page at a time.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_5X8, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use garden_core::traits::{Display, DisplayError, TextScale};

use super::framebuffer::{FrameBuffer, PAGES, WIDTH};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Control byte announcing a command
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing display data
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Memory addressing mode used by `flush`
const PAGE_ADDRESSING: u8 = 0x02;

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    frame: FrameBuffer,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            frame: FrameBuffer::new(),
        }
    }

    /// Initialize the display
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // internal charge pump
            cmd::SET_MEMORY_MODE,
            PAGE_ADDRESSING,
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }

    /// Send the frame buffer to the display
    pub fn flush(&mut self) -> Result<(), I2C::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.frame.page(page));
            self.i2c.write(self.address, &data)?;
        }

        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn font(scale: TextScale) -> &'static MonoFont<'static> {
    match scale {
        TextScale::Small => &FONT_5X8,
        TextScale::Medium => &FONT_9X15,
        TextScale::Large => &FONT_10X20,
    }
}

impl<I2C: I2c> Display for Ssd1306<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear_all();
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        scale: TextScale,
        text: &str,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font(scale), BinaryColor::On);
        // the frame buffer clips, drawing cannot fail
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.frame);
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        let _ = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.frame);
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.flush().map_err(|_| DisplayError::Bus)
    }
}
