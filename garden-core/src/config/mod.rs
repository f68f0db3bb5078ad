//! Configuration types
//!
//! Board-agnostic tuning values for the controller. The firmware fills these
//! in at compile time from `garden.toml`; `Default` gives the stock values.

pub mod types;

pub use types::*;
