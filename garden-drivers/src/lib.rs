//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in garden-core, written against the `embedded-hal` family of traits:
//!
//! - Light actuator (two PWM LED channels plus the pump switch)
//! - SSD1306 OLED display with an `embedded-graphics` frame buffer
//! - Flash sector store
//! - Encoder input (quadrature decoder, button debouncer)

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod display;
pub mod input;
pub mod storage;

pub use actuator::LightActuator;
pub use display::{FrameBuffer, Ssd1306};
pub use input::{Debouncer, QuadratureDecoder};
pub use storage::SectorStore;
