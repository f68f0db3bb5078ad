//! Light and pump output trait

/// Output stage driving the two LED channels and the irrigation pump
///
/// Power values are percentages in `0..=100`. Implementations must accept
/// the full range and are expected to be infallible from the controller's
/// point of view; hardware faults are handled (or ignored) below this layer.
pub trait Actuator {
    /// Switch the irrigation pump
    fn set_pump(&mut self, on: bool);

    /// Set white/red LED channel power (percent)
    fn set_white_red(&mut self, percent: u8);

    /// Set blue LED channel power (percent)
    fn set_blue(&mut self, percent: u8);
}
