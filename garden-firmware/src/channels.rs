//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use garden_core::state::InputEvent;

/// Channel capacity for input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Encoder steps and button clicks, oldest first
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Latest tick timestamp in milliseconds since boot
///
/// A signal rather than a channel: a missed tick is superseded by the next.
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u64> = Signal::new();
