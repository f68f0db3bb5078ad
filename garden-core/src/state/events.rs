//! Input events and the effects they request

/// User input from the rotary encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder turned by this many detents (positive is clockwise)
    Rotate(i32),
    /// Button pressed and released
    Click,
}

/// Side effect requested by a navigation step
///
/// The navigation machine only touches the profile data and its own
/// context. Anything involving the outputs, storage or the clock is
/// handed back to the controller as an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Drive the LEDs at these levels until the next evaluation
    Preview { white_red: u8, blue: u8 },
    /// The active profile was switched; re-evaluate and push
    ActivateProfile,
    /// Write the profile set to storage
    Save,
    /// Replace the profile set from storage
    Reload,
    /// Reboot into the flashing bootloader
    EnterBootloader,
    /// Shift the light clock by this many hours
    ShiftLight(i8),
}

/// Outcome of handling one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// The screen content changed
    pub redraw: bool,
    pub effect: Option<Effect>,
}

impl Transition {
    /// Nothing happened
    pub const NONE: Self = Self {
        redraw: false,
        effect: None,
    };

    /// Redraw only
    pub const REDRAW: Self = Self {
        redraw: true,
        effect: None,
    };

    pub const fn redraw_if(changed: bool) -> Self {
        Self {
            redraw: changed,
            effect: None,
        }
    }

    pub const fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}
