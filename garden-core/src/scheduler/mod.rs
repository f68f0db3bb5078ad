//! Light and pump scheduler
//!
//! Derives the output state from elapsed time and the active profile.
//! The light schedule follows a clock the user can shift; the pump
//! cadence always counts from boot.

pub mod clock;
pub mod engine;

pub use clock::{Clock, Elapsed, MS_PER_HOUR, MS_PER_MINUTE};
pub use engine::{active_period, pump_phase, Evaluation, OutputState, ScheduleEngine};
