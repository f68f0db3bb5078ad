//! Host test doubles for the controller's collaborators

#![allow(dead_code)]

use garden_core::config::ControllerConfig;
use garden_core::traits::storage::REGION_SIZE;
use garden_core::traits::{
    Actuator, Bootloader, Display, DisplayError, NonVolatileStore, StoreError, TextScale,
};
use garden_core::{Controller, Devices};

#[derive(Debug, Default)]
pub struct MockActuator {
    pub pump: bool,
    pub white_red: u8,
    pub blue: u8,
    pub writes: usize,
}

impl Actuator for MockActuator {
    fn set_pump(&mut self, on: bool) {
        self.pump = on;
        self.writes += 1;
    }

    fn set_white_red(&mut self, percent: u8) {
        self.white_red = percent;
    }

    fn set_blue(&mut self, percent: u8) {
        self.blue = percent;
    }
}

/// Keeps the text of the last presented frame
#[derive(Debug, Default)]
pub struct MockDisplay {
    pending: Vec<(i32, i32, String)>,
    pub frame: Vec<(i32, i32, String)>,
    pub frames: usize,
    pub fail: bool,
}

impl MockDisplay {
    pub fn shows(&self, text: &str) -> bool {
        self.frame.iter().any(|(_, _, t)| t == text)
    }
}

impl Display for MockDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.pending.clear();
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        _scale: TextScale,
        text: &str,
    ) -> Result<(), DisplayError> {
        self.pending.push((x, y, text.to_string()));
        Ok(())
    }

    fn draw_line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32) -> Result<(), DisplayError> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.frame = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockStore {
    pub data: Vec<u8>,
    pub fail_program: bool,
    pub fail_read: bool,
}

impl Default for MockStore {
    fn default() -> Self {
        Self {
            data: vec![0xFF; REGION_SIZE],
            fail_program: false,
            fail_read: false,
        }
    }
}

impl NonVolatileStore for MockStore {
    fn erase_unit(&mut self, _offset: u32) -> Result<(), StoreError> {
        self.data.iter_mut().for_each(|b| *b = 0xFF);
        Ok(())
    }

    fn program(&mut self, offset: u32, bytes: &[u8]) -> Result<(), StoreError> {
        if self.fail_program {
            return Err(StoreError::Flash);
        }
        let start = offset as usize;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn read_bytes(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
        if self.fail_read {
            return Err(StoreError::Flash);
        }
        let start = offset as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MockBootloader {
    pub entered: bool,
}

impl Bootloader for MockBootloader {
    fn enter_flash_mode(&mut self) {
        self.entered = true;
    }
}

pub type TestController = Controller<MockActuator, MockDisplay, MockStore, MockBootloader>;

pub fn devices_with(store: MockStore) -> Devices<MockActuator, MockDisplay, MockStore, MockBootloader> {
    Devices {
        actuator: MockActuator::default(),
        display: MockDisplay::default(),
        store,
        bootloader: MockBootloader::default(),
    }
}

/// Controller booted at t=0 with an erased store
pub fn boot() -> TestController {
    Controller::new(ControllerConfig::default(), devices_with(MockStore::default()), 0)
}

pub const MINUTE: u64 = 60_000;
