//! Board-agnostic core logic for the Garden grow light controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, display, storage, bootloader)
//! - Profile model and its flash image format
//! - Schedule engine (light periods and pump cadence)
//! - Navigation state machine for the encoder UI
//! - Screen layouts
//! - The controller that owns all of the above

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod profile;
pub mod scheduler;
pub mod screen;
pub mod state;
pub mod traits;

pub use controller::{Controller, Devices, Event, Events};
