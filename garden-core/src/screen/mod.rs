//! Screen rendering
//!
//! Draws every UI mode and the transient notices through the `Display`
//! trait. Layouts target a 128x64 monochrome panel.

pub mod renderer;

pub use renderer::{render, render_notice, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Full-screen message shown after a maintenance action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    Saved,
    SaveFailed,
    NoData,
    DataLoaded,
    ToFlash,
}

impl Notice {
    pub const fn text(self) -> &'static str {
        match self {
            Notice::Saved => "SAVED...",
            Notice::SaveFailed => "SAVE FAILED",
            Notice::NoData => "NO DATA",
            Notice::DataLoaded => "DATA LOADED",
            Notice::ToFlash => "TO FLASH...",
        }
    }
}
