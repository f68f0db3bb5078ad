//! Flash sector store
//!
//! Maps the controller's persisted region onto one erase unit of a NOR
//! flash, normally the last 4 KiB sector so it never collides with the
//! firmware image.

use embedded_storage::nor_flash::NorFlash;

use garden_core::traits::storage::{NonVolatileStore, StoreError, REGION_SIZE};

/// One erase unit of NOR flash
pub struct SectorStore<F> {
    flash: F,
    base: u32,
}

impl<F: NorFlash> SectorStore<F> {
    /// Use the region starting at `base` (must be erase-aligned)
    pub fn new(flash: F, base: u32) -> Result<Self, StoreError> {
        if base as usize % F::ERASE_SIZE != 0 || REGION_SIZE % F::ERASE_SIZE != 0 {
            return Err(StoreError::NotAligned);
        }
        if base as usize + REGION_SIZE > flash.capacity() {
            return Err(StoreError::OutOfBounds);
        }
        Ok(Self { flash, base })
    }

    /// Use the last sector of the flash
    pub fn last_sector(flash: F) -> Result<Self, StoreError> {
        let base = flash
            .capacity()
            .checked_sub(REGION_SIZE)
            .ok_or(StoreError::OutOfBounds)?;
        Self::new(flash, base as u32)
    }

    /// Absolute flash offset of the region
    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn release(self) -> F {
        self.flash
    }

    /// Translate a region offset to an absolute flash offset
    fn absolute(&self, offset: u32, len: usize) -> Result<u32, StoreError> {
        let end = (offset as usize)
            .checked_add(len)
            .ok_or(StoreError::OutOfBounds)?;
        if end > REGION_SIZE {
            return Err(StoreError::OutOfBounds);
        }
        Ok(self.base + offset)
    }
}

impl<F: NorFlash> NonVolatileStore for SectorStore<F> {
    fn erase_unit(&mut self, offset: u32) -> Result<(), StoreError> {
        if offset as usize % REGION_SIZE != 0 {
            return Err(StoreError::NotAligned);
        }
        let from = self.absolute(offset, REGION_SIZE)?;
        self.flash
            .erase(from, from + REGION_SIZE as u32)
            .map_err(|_| StoreError::Flash)
    }

    fn program(&mut self, offset: u32, bytes: &[u8]) -> Result<(), StoreError> {
        if offset as usize % F::WRITE_SIZE != 0 || bytes.len() % F::WRITE_SIZE != 0 {
            return Err(StoreError::NotAligned);
        }
        let at = self.absolute(offset, bytes.len())?;
        self.flash.write(at, bytes).map_err(|_| StoreError::Flash)
    }

    fn read_bytes(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError> {
        let at = self.absolute(offset, buf.len())?;
        self.flash.read(at, buf).map_err(|_| StoreError::Flash)
    }
}
