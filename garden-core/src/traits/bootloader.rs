//! Bootloader re-entry trait

/// Reboot into the mass-storage flashing mode
pub trait Bootloader {
    /// Hand control to the ROM bootloader
    ///
    /// On hardware this never returns. Host test doubles record the call
    /// and return so the controller can be inspected afterwards.
    fn enter_flash_mode(&mut self);
}
