//! Non-volatile storage trait
//!
//! The controller persists its profiles in a single erase unit. Offsets
//! passed to these methods are relative to the start of that region.

/// Size of the persisted region (one flash sector)
pub const REGION_SIZE: usize = 4096;

/// Storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying flash operation failed
    Flash,
    /// Offset or length outside the region
    OutOfBounds,
    /// Offset or length not aligned to the device's granularity
    NotAligned,
}

/// Byte-addressable store over one erase unit
pub trait NonVolatileStore {
    /// Erase the erase unit starting at `offset` (sets it to `0xFF`)
    fn erase_unit(&mut self, offset: u32) -> Result<(), StoreError>;

    /// Program bytes at `offset`; the target must have been erased
    fn program(&mut self, offset: u32, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read `buf.len()` bytes starting at `offset`
    fn read_bytes(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), StoreError>;
}
