//! Tick task for time-based updates
//!
//! Drives schedule evaluation, the idle timeout and notice expiry in the
//! controller.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use crate::channels::TICK_SIGNAL;
use crate::config::TICK_INTERVAL_MS;

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started ({} ms)", TICK_INTERVAL_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis());
    }
}
