//! UI mode definitions
//!
//! Every screen the user can be on is a `UiMode` variant. Selection data
//! lives in the variant that uses it, so a mode can never refer to a
//! selection that belongs to another screen.

use crate::profile::{PERIOD_COUNT, PROFILE_COUNT};

/// UI modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    /// Live status of the active profile
    #[default]
    ShowState,
    /// Browsing a profile other than the active one
    ShowProfile { browsed: usize },
    /// Period list of the active profile; `None` selects BACK
    EditProfile { row: Option<usize> },
    /// Field list of one period
    EditPeriod { period: usize, field: PeriodField },
    /// Adjusting one field of one period
    EditValue { period: usize, field: ValueField },
    /// Maintenance menu
    TopMenu { action: MenuAction },
    /// Choosing a light clock shift
    TimeShift { hours: i8 },
}

impl UiMode {
    /// Browse mode for `index`: plain status if it is the active profile
    pub fn browse(index: usize, active: usize) -> Self {
        if index == active {
            UiMode::ShowState
        } else {
            UiMode::ShowProfile { browsed: index }
        }
    }

    /// Whether this mode is one of the editing screens
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            UiMode::EditProfile { .. } | UiMode::EditPeriod { .. } | UiMode::EditValue { .. }
        )
    }
}

/// Rows of the period editing screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodField {
    Back,
    Duration,
    WhiteRed,
    Blue,
}

impl PeriodField {
    const ALL: [PeriodField; 4] = [
        PeriodField::Back,
        PeriodField::Duration,
        PeriodField::WhiteRed,
        PeriodField::Blue,
    ];

    /// Step through the rows; one step past either end wraps to the other
    pub fn step(self, delta: i32) -> Self {
        let index = wrap_once(self as i64 + i64::from(delta), 0, Self::ALL.len() as i64 - 1);
        Self::ALL[index as usize]
    }

    /// The editable value behind this row, if any
    pub fn value(self) -> Option<ValueField> {
        match self {
            PeriodField::Back => None,
            PeriodField::Duration => Some(ValueField::Duration),
            PeriodField::WhiteRed => Some(ValueField::WhiteRed),
            PeriodField::Blue => Some(ValueField::Blue),
        }
    }
}

/// Editable period values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueField {
    Duration,
    WhiteRed,
    Blue,
}

impl From<ValueField> for PeriodField {
    fn from(field: ValueField) -> Self {
        match field {
            ValueField::Duration => PeriodField::Duration,
            ValueField::WhiteRed => PeriodField::WhiteRed,
            ValueField::Blue => PeriodField::Blue,
        }
    }
}

/// Top menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuAction {
    Shift,
    Save,
    Reload,
    Flash,
}

impl MenuAction {
    const ALL: [MenuAction; 4] = [
        MenuAction::Shift,
        MenuAction::Save,
        MenuAction::Reload,
        MenuAction::Flash,
    ];

    /// Step through the menu
    ///
    /// Returns `None` when stepping above the first entry, which leaves the
    /// menu. Stepping past the last entry wraps to the first.
    pub fn step(self, delta: i32) -> Option<Self> {
        let next = self as i64 + i64::from(delta);
        if next < 0 {
            None
        } else if next >= Self::ALL.len() as i64 {
            Some(MenuAction::Shift)
        } else {
            Some(Self::ALL[next as usize])
        }
    }
}

/// Profile browsing step
///
/// Returns `None` when stepping below the first profile (into the top
/// menu); stepping past the last profile wraps to the first.
pub fn step_profile(index: usize, delta: i32) -> Option<usize> {
    let next = index as i64 + i64::from(delta);
    if next < 0 {
        None
    } else if next >= PROFILE_COUNT as i64 {
        Some(0)
    } else {
        Some(next as usize)
    }
}

/// Period row step over BACK (`None`) and the six periods
pub fn step_row(row: Option<usize>, delta: i32) -> Option<usize> {
    let current = row.map_or(-1, |r| r as i64);
    let next = wrap_once(current + i64::from(delta), -1, PERIOD_COUNT as i64 - 1);
    if next < 0 {
        None
    } else {
        Some(next as usize)
    }
}

/// Below `min` goes to `max`, above `max` goes to `min`
fn wrap_once(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}
