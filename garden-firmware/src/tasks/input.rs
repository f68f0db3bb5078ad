//! Encoder and button polling task
//!
//! Samples the encoder lines and the push button, decodes them and queues
//! navigation input for the controller.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use garden_core::state::InputEvent;
use garden_drivers::input::{Debouncer, QuadratureDecoder};

use crate::channels::INPUT_CHANNEL;
use crate::config::{DEBOUNCE_MS, ENCODER_REVERSED, POLL_INTERVAL_MS};

/// Input task - polls the encoder and button (active low, pulled up)
#[embassy_executor::task]
pub async fn input_task(a: Input<'static>, b: Input<'static>, button: Input<'static>) {
    info!("Input task started");

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high()).reversed(ENCODER_REVERSED);
    let mut debouncer = Debouncer::new(DEBOUNCE_MS);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        let step = decoder.update(a.is_high(), b.is_high());
        if step != 0 {
            trace!("Encoder step {}", step);
            INPUT_CHANNEL.send(InputEvent::Rotate(step)).await;
        }

        if debouncer.update(button.is_low(), Instant::now().as_millis()) {
            trace!("Button click");
            INPUT_CHANNEL.send(InputEvent::Click).await;
        }
    }
}
