//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod input;
pub mod tick;

pub use controller::controller_task;
pub use input::input_task;
pub use tick::tick_task;
