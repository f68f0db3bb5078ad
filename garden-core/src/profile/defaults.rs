//! Factory profiles

use super::{Period, Profile, PERIOD_COUNT, PROFILE_COUNT};

const OFF: Period = Period::DISABLED;

/// Profiles shipped with a fresh device
pub(super) fn factory_profiles() -> [Profile; PROFILE_COUNT] {
    [
        Profile::new("VEG", day(Period::hours(14, 100, 100), Period::hours(10, 0, 0))),
        Profile::new("FLOWER", day(Period::hours(12, 100, 0), Period::hours(12, 0, 0))),
        Profile::new("FRUIT", day(Period::hours(16, 100, 0), Period::hours(8, 0, 0))),
        Profile::new("CUSTOM 1", [OFF; PERIOD_COUNT]),
        Profile::new("CUSTOM 2", [OFF; PERIOD_COUNT]),
    ]
}

/// Light phase followed by a dark phase, remaining slots disabled
fn day(light: Period, dark: Period) -> [Period; PERIOD_COUNT] {
    [light, dark, OFF, OFF, OFF, OFF]
}
