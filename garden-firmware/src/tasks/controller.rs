//! Main controller task
//!
//! Owns the controller and feeds it input events and ticks. Each event is
//! handled to completion, redraw included, before the next is taken.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Instant;

use garden_core::Event;

use crate::board::BoardController;
use crate::channels::{INPUT_CHANNEL, TICK_SIGNAL};

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut controller: BoardController) {
    info!("Controller task started");

    let out = controller.output();
    info!(
        "Initial output: period {:?}, W/R {}%, B {}%, pump {}",
        out.period_index, out.white_red, out.blue, out.pump_on
    );

    loop {
        let events = match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(input) => {
                debug!("Input: {:?}", input);
                controller.handle_input(input, Instant::now().as_millis())
            }
            Either::Second(now_ms) => controller.tick(now_ms),
        };

        for event in &events {
            log_event(event);
        }

        if controller.devices_mut().actuator.take_fault() {
            warn!("Output stage rejected a write");
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::OutputChanged(out) => debug!(
            "Output: period {:?} ({} min left), W/R {}%, B {}%, pump {} ({} min left)",
            out.period_index,
            out.period_minutes_left,
            out.white_red,
            out.blue,
            out.pump_on,
            out.pump_minutes_left
        ),
        Event::IdleTimeout => debug!("Idle, back to status screen"),
        Event::ProfileActivated(index) => info!("Profile {} activated", index),
        Event::Saved => info!("Profiles saved to flash"),
        Event::SaveFailed(e) => error!("Saving profiles failed: {:?}", e),
        Event::Reloaded => info!("Profiles reloaded from flash"),
        Event::NoSavedData => warn!("No saved profiles in flash"),
        Event::TimeShifted(hours) => info!("Light schedule shifted by {} h", hours),
        Event::EnteringBootloader => info!("Entering USB bootloader"),
        Event::DisplayFailed(e) => warn!("Display update failed: {:?}", e),
    }
}
