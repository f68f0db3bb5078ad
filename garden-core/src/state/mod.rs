//! UI navigation state machine
//!
//! Turns encoder input into mode changes, profile edits and requests for
//! the controller (preview, activate, save, reload, time shift, flash).

pub mod events;
pub mod machine;
pub mod navigation;

pub use events::{Effect, InputEvent, Transition};
pub use machine::{MenuAction, PeriodField, UiMode, ValueField};
pub use navigation::{NavigationContext, MAX_TIME_SHIFT_HOURS};
