//! Encoder and push-button decoding
//!
//! Both decoders are fed raw pin levels by a polling task and turn them
//! into navigation steps and clicks.

pub mod button;
pub mod encoder;

pub use button::Debouncer;
pub use encoder::QuadratureDecoder;
