//! Build-time configuration
//!
//! `build.rs` validates garden.toml and turns it into the constants below.

use garden_core::config::{ControllerConfig, PumpConfig, UiConfig};

include!(concat!(env!("OUT_DIR"), "/garden_config.rs"));
