//! Push-button debouncer
//!
//! A level only counts once it has been stable for the debounce window.
//! A click is reported on the debounced release.

/// Debounced push button
#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_ms: u64,
    /// Debounced level
    pressed: bool,
    /// Last raw level and when it was first seen
    raw: bool,
    raw_since_ms: u64,
}

impl Debouncer {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            pressed: false,
            raw: false,
            raw_since_ms: 0,
        }
    }

    /// Debounced state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed the raw level (`true` = pressed)
    ///
    /// Returns `true` once per press, when the release has been stable for
    /// the debounce window.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_since_ms = now_ms;
            return false;
        }

        if self.raw == self.pressed
            || now_ms.saturating_sub(self.raw_since_ms) < self.debounce_ms
        {
            return false;
        }

        self.pressed = self.raw;
        !self.pressed
    }
}
