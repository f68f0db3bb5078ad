//! Schedule engine
//!
//! Pure time-to-output derivation. The engine never blocks and never fails;
//! identical inputs always give identical output.

use super::clock::Elapsed;
use crate::config::PumpConfig;
use crate::profile::{Period, Profile};

/// Outputs derived from the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputState {
    /// Active period slot, `None` when no period is running
    pub period_index: Option<u8>,
    /// White/red channel power (percent)
    pub white_red: u8,
    /// Blue channel power (percent)
    pub blue: u8,
    pub pump_on: bool,
    /// Minutes until the pump toggles
    pub pump_minutes_left: u32,
    /// Minutes until the active period ends
    pub period_minutes_left: u32,
}

impl OutputState {
    /// Everything off
    pub const OFF: Self = Self {
        period_index: None,
        white_red: 0,
        blue: 0,
        pump_on: false,
        pump_minutes_left: 0,
        period_minutes_left: 0,
    };
}

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    pub state: OutputState,
    /// True if any field differs from the previous state
    pub changed: bool,
}

/// Schedule engine
#[derive(Debug, Clone, Copy)]
pub struct ScheduleEngine {
    pump: PumpConfig,
}

impl ScheduleEngine {
    pub const fn new(pump: PumpConfig) -> Self {
        Self { pump }
    }

    pub fn pump_config(&self) -> &PumpConfig {
        &self.pump
    }

    /// Evaluate the profile at `elapsed`
    pub fn evaluate(&self, elapsed: Elapsed, profile: &Profile, previous: &OutputState) -> Evaluation {
        let mut state = OutputState::OFF;

        let (pump_on, pump_minutes_left) = pump_phase(&self.pump, elapsed.pump_minutes);
        state.pump_on = pump_on;
        state.pump_minutes_left = pump_minutes_left;

        if let Some((index, period, minutes_left)) = active_period(profile, elapsed.light_minutes) {
            state.period_index = Some(index as u8);
            state.white_red = period.white_red;
            state.blue = period.blue;
            state.period_minutes_left = minutes_left;
        }

        Evaluation {
            changed: state != *previous,
            state,
        }
    }
}

/// Pump state at `minutes` since boot
///
/// Returns `(on, minutes until the next toggle)`.
pub fn pump_phase(pump: &PumpConfig, minutes: u64) -> (bool, u32) {
    let cycle = pump.cycle_minutes();
    if cycle == 0 {
        return (false, 0);
    }

    let position = (minutes % u64::from(cycle)) as u32;
    if position < pump.run_minutes {
        (true, pump.run_minutes - position)
    } else {
        (false, cycle - position)
    }
}

/// Find the period running at `light_minutes`
///
/// The position wraps around the profile's total length. Disabled slots are
/// skipped but keep their index. Returns `(index, period, minutes left)`.
pub fn active_period(profile: &Profile, light_minutes: i64) -> Option<(usize, &Period, u32)> {
    let total = profile.light_total();
    if total == 0 {
        return None;
    }

    let position = light_minutes.rem_euclid(i64::from(total)) as u32;
    let mut start = 0u32;
    for (index, period) in profile.periods.iter().enumerate() {
        if !period.is_enabled() {
            continue;
        }
        let end = start + u32::from(period.duration_minutes);
        if position < end {
            return Some((index, period, end - position));
        }
        start = end;
    }

    None
}
