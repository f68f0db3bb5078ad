//! PWM light actuator
//!
//! Drives the white/red and blue LED strings through two PWM channels and
//! switches the pump through a GPIO pin. Percentages map linearly onto the
//! channel's duty range, so 50% on a 25000-step counter is a compare value
//! of 12500.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use garden_core::profile::MAX_POWER_PERCENT;
use garden_core::traits::Actuator;

/// Light and pump output stage
pub struct LightActuator<WR, BL, P> {
    white_red: WR,
    blue: BL,
    pump: P,
    /// A channel or pin rejected the last write
    fault: bool,
}

impl<WR, BL, P> LightActuator<WR, BL, P>
where
    WR: SetDutyCycle,
    BL: SetDutyCycle,
    P: OutputPin,
{
    /// Create the actuator with both channels dark and the pump off
    pub fn new(white_red: WR, blue: BL, pump: P) -> Self {
        let mut actuator = Self {
            white_red,
            blue,
            pump,
            fault: false,
        };
        actuator.set_white_red(0);
        actuator.set_blue(0);
        actuator.set_pump(false);
        actuator
    }

    /// Return and clear the fault flag
    pub fn take_fault(&mut self) -> bool {
        core::mem::replace(&mut self.fault, false)
    }
}

impl<WR, BL, P> Actuator for LightActuator<WR, BL, P>
where
    WR: SetDutyCycle,
    BL: SetDutyCycle,
    P: OutputPin,
{
    fn set_pump(&mut self, on: bool) {
        let result = if on {
            self.pump.set_high()
        } else {
            self.pump.set_low()
        };
        self.fault |= result.is_err();
    }

    fn set_white_red(&mut self, percent: u8) {
        let result = self
            .white_red
            .set_duty_cycle_percent(percent.min(MAX_POWER_PERCENT));
        self.fault |= result.is_err();
    }

    fn set_blue(&mut self, percent: u8) {
        let result = self
            .blue
            .set_duty_cycle_percent(percent.min(MAX_POWER_PERCENT));
        self.fault |= result.is_err();
    }
}
