//! Clock baselines

/// Milliseconds per minute
pub const MS_PER_MINUTE: u64 = 60_000;

/// Milliseconds per hour
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Elapsed time as seen by the schedule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Elapsed {
    /// Minutes on the (shiftable) light clock, negative after a forward
    /// shift close to boot
    pub light_minutes: i64,
    /// Minutes since boot, used for the pump cadence
    pub pump_minutes: u64,
}

impl Elapsed {
    pub const fn new(light_minutes: i64, pump_minutes: u64) -> Self {
        Self {
            light_minutes,
            pump_minutes,
        }
    }

    /// Unshifted time: both clocks read `minutes`
    pub const fn minutes(minutes: u64) -> Self {
        Self::new(minutes as i64, minutes)
    }
}

/// Boot timestamp plus the user's light-clock shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clock {
    boot_ms: u64,
    light_shift_ms: i64,
}

impl Clock {
    pub const fn new(boot_ms: u64) -> Self {
        Self {
            boot_ms,
            light_shift_ms: 0,
        }
    }

    /// Move the light schedule start by `hours`
    ///
    /// A positive shift moves the start later, so the schedule position
    /// goes back. The pump baseline is not touched.
    pub fn shift_light_hours(&mut self, hours: i32) {
        self.light_shift_ms = self
            .light_shift_ms
            .saturating_add(i64::from(hours) * MS_PER_HOUR);
    }

    /// Accumulated shift in whole hours
    pub fn light_shift_hours(&self) -> i64 {
        self.light_shift_ms / MS_PER_HOUR
    }

    pub fn elapsed(&self, now_ms: u64) -> Elapsed {
        let since_boot = now_ms.saturating_sub(self.boot_ms);
        let light_ms = since_boot as i64 - self.light_shift_ms;
        Elapsed {
            light_minutes: light_ms.div_euclid(MS_PER_MINUTE as i64),
            pump_minutes: since_boot / MS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_from_boot() {
        let clock = Clock::new(1_000);
        let elapsed = clock.elapsed(1_000 + 5 * MS_PER_MINUTE + 59_999);
        assert_eq!(elapsed, Elapsed::minutes(5));
    }

    #[test]
    fn test_before_boot_saturates() {
        let clock = Clock::new(10_000);
        assert_eq!(clock.elapsed(0), Elapsed::minutes(0));
    }

    #[test]
    fn test_shift_only_moves_light_clock() {
        let mut clock = Clock::new(0);
        clock.shift_light_hours(-2);
        let elapsed = clock.elapsed(10 * MS_PER_MINUTE);
        assert_eq!(elapsed.light_minutes, 130);
        assert_eq!(elapsed.pump_minutes, 10);
        assert_eq!(clock.light_shift_hours(), -2);
    }

    #[test]
    fn test_forward_shift_goes_negative() {
        let mut clock = Clock::new(0);
        clock.shift_light_hours(1);
        // 30.5 minutes after boot is 29.5 minutes before the shifted start
        let elapsed = clock.elapsed(30 * MS_PER_MINUTE + 30_000);
        assert_eq!(elapsed.light_minutes, -30);
        assert_eq!(elapsed.pump_minutes, 30);
    }

    #[test]
    fn test_shifts_accumulate() {
        let mut clock = Clock::new(0);
        clock.shift_light_hours(3);
        clock.shift_light_hours(-5);
        assert_eq!(clock.light_shift_hours(), -2);
    }
}
