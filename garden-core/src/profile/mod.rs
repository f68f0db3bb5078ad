//! Light profiles
//!
//! A profile is a named daily cycle of up to six periods. Each period holds
//! its length and the power of both LED channels. The controller keeps five
//! profiles, one of which is active.

mod defaults;
pub mod persist;

use heapless::String;
use serde::{Deserialize, Serialize};

pub use persist::{decode_image, encode_image, load, save, PersistError, MAGIC};

/// Maximum profile name length
pub const MAX_NAME_LEN: usize = 15;

/// Number of profiles in a set
pub const PROFILE_COUNT: usize = 5;

/// Number of period slots per profile
pub const PERIOD_COUNT: usize = 6;

/// Longest allowed period (one day)
pub const MAX_DURATION_MINUTES: u16 = 1440;

/// Highest LED power
pub const MAX_POWER_PERCENT: u8 = 100;

/// One timed segment of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Period {
    /// Length in minutes; zero disables the slot
    pub duration_minutes: u16,
    /// White/red channel power (percent)
    pub white_red: u8,
    /// Blue channel power (percent)
    pub blue: u8,
}

impl Period {
    /// An empty slot
    pub const DISABLED: Self = Self::new(0, 0, 0);

    pub const fn new(duration_minutes: u16, white_red: u8, blue: u8) -> Self {
        Self {
            duration_minutes,
            white_red,
            blue,
        }
    }

    /// Build a period from whole hours
    pub const fn hours(hours: u16, white_red: u8, blue: u8) -> Self {
        Self::new(hours * 60, white_red, blue)
    }

    /// Whether the engine takes this slot into account
    pub const fn is_enabled(&self) -> bool {
        self.duration_minutes > 0
    }

    /// Check every field against its range
    pub const fn is_valid(&self) -> bool {
        self.duration_minutes <= MAX_DURATION_MINUTES
            && self.white_red <= MAX_POWER_PERCENT
            && self.blue <= MAX_POWER_PERCENT
    }

    /// Add `delta` minutes, clamped to `0..=1440`
    ///
    /// Returns true if the stored value changed.
    pub fn adjust_duration(&mut self, delta: i32) -> bool {
        let next = clamp_add(self.duration_minutes as i32, delta, MAX_DURATION_MINUTES as i32);
        let changed = next != self.duration_minutes as i32;
        self.duration_minutes = next as u16;
        changed
    }

    /// Add `delta` percent to the white/red channel, clamped to `0..=100`
    pub fn adjust_white_red(&mut self, delta: i32) -> bool {
        let next = clamp_add(self.white_red as i32, delta, MAX_POWER_PERCENT as i32);
        let changed = next != self.white_red as i32;
        self.white_red = next as u8;
        changed
    }

    /// Add `delta` percent to the blue channel, clamped to `0..=100`
    pub fn adjust_blue(&mut self, delta: i32) -> bool {
        let next = clamp_add(self.blue as i32, delta, MAX_POWER_PERCENT as i32);
        let changed = next != self.blue as i32;
        self.blue = next as u8;
        changed
    }
}

fn clamp_add(value: i32, delta: i32, max: i32) -> i32 {
    value.saturating_add(delta).clamp(0, max)
}

/// A named daily schedule
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Profile {
    pub name: String<MAX_NAME_LEN>,
    /// Periods in execution order
    pub periods: [Period; PERIOD_COUNT],
}

impl Profile {
    /// Create a profile; names longer than 15 characters are truncated
    pub fn new(name: &str, periods: [Period; PERIOD_COUNT]) -> Self {
        let mut label = String::new();
        for c in name.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self {
            name: label,
            periods,
        }
    }

    /// Sum of all period durations (minutes)
    pub fn light_total(&self) -> u32 {
        self.periods
            .iter()
            .map(|p| u32::from(p.duration_minutes))
            .sum()
    }

    pub fn is_valid(&self) -> bool {
        self.name.len() <= MAX_NAME_LEN && self.periods.iter().all(Period::is_valid)
    }
}

/// The five profiles plus the active selection
///
/// This is the unit that gets saved and loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileSet {
    pub profiles: [Profile; PROFILE_COUNT],
    active: usize,
}

impl ProfileSet {
    /// Create a set; an out-of-range active index falls back to 0
    pub fn new(profiles: [Profile; PROFILE_COUNT], active: usize) -> Self {
        let active = if active < PROFILE_COUNT { active } else { 0 };
        Self { profiles, active }
    }

    /// Factory profiles with `VEG` active
    pub fn factory() -> Self {
        Self::new(defaults::factory_profiles(), 0)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Select the active profile
    ///
    /// Returns false (and leaves the selection alone) if `index` is out of range.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < PROFILE_COUNT {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> &Profile {
        &self.profiles[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Profile {
        &mut self.profiles[self.active]
    }

    pub fn profile(&self, index: usize) -> Option<&Profile> {
        self.profiles.get(index)
    }

    pub fn is_valid(&self) -> bool {
        self.active < PROFILE_COUNT && self.profiles.iter().all(Profile::is_valid)
    }
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::factory()
    }
}
