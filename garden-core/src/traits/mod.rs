//! Hardware abstraction traits
//!
//! These traits define the interface between the controller logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod bootloader;
pub mod display;
pub mod storage;

pub use actuator::Actuator;
pub use bootloader::Bootloader;
pub use display::{Display, DisplayError, TextScale};
pub use storage::{NonVolatileStore, StoreError};
