//! Configuration type definitions

/// Pump cadence configuration
///
/// The pump runs for `run_minutes`, then rests for `wait_minutes`, measured
/// from boot. The cycle is never affected by the light time shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PumpConfig {
    /// Minutes the pump is on at the start of each cycle
    pub run_minutes: u32,
    /// Minutes the pump is off after each run
    pub wait_minutes: u32,
}

impl PumpConfig {
    /// Full cycle length in minutes
    pub const fn cycle_minutes(&self) -> u32 {
        self.run_minutes + self.wait_minutes
    }
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            run_minutes: 5,
            wait_minutes: 30,
        }
    }
}

/// User interface configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    /// Return to the status screen after this long without input (ms)
    pub idle_timeout_ms: u64,
    /// Duration change per encoder detent (minutes)
    pub duration_step_minutes: u16,
    /// Power change per encoder detent (percent)
    pub power_step_percent: u8,
    /// How long a notice stays on screen (ms)
    pub notice_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 10_000,
            duration_step_minutes: 60,
            power_step_percent: 5,
            notice_ms: 2_000,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub pump: PumpConfig,
    pub ui: UiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pump_cycle() {
        let pump = PumpConfig::default();
        assert_eq!(pump.run_minutes, 5);
        assert_eq!(pump.wait_minutes, 30);
        assert_eq!(pump.cycle_minutes(), 35);
    }

    #[test]
    fn test_default_ui() {
        let ui = UiConfig::default();
        assert_eq!(ui.idle_timeout_ms, 10_000);
        assert_eq!(ui.duration_step_minutes, 60);
        assert_eq!(ui.power_step_percent, 5);
        assert_eq!(ui.notice_ms, 2_000);
    }
}
