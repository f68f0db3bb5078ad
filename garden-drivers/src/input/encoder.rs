//! Rotary Encoder Decoder
//!
//! Decodes quadrature encoder levels into detent steps. Uses a state
//! machine so contact bounce inside a detent never produces a step.

/// Decoder state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder for a detented encoder with pull-ups (both lines high
/// at rest)
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: State,
    last_a: bool,
    last_b: bool,
    reversed: bool,
}

impl QuadratureDecoder {
    /// Create a decoder from the current line levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last_a: a,
            last_b: b,
            reversed: false,
        }
    }

    /// Swap the meaning of clockwise and counter-clockwise
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Feed the current line levels
    ///
    /// Returns +1 for a clockwise detent, -1 for counter-clockwise and 0
    /// otherwise.
    pub fn update(&mut self, a: bool, b: bool) -> i32 {
        if a == self.last_a && b == self.last_b {
            return 0;
        }
        self.last_a = a;
        self.last_b = b;

        let step = self.decode(a, b);
        if self.reversed {
            -step
        } else {
            step
        }
    }

    /// CW:  Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> step -> Idle
    /// CCW: Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> step -> Idle
    fn decode(&mut self, a: bool, b: bool) -> i32 {
        match self.state {
            State::Idle => {
                if !a && b {
                    // A fell first
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                0
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // bounce
                    self.state = State::Idle;
                }
                0
            }
            State::CwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return 1;
                }
                0
            }
            State::CcwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return -1;
                }
                0
            }
        }
    }
}
