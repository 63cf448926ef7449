//! Lamp task
//!
//! Owns the lamp driver and runs one scheduler pass per tick.

use defmt::*;

use bttf_core::lamp::TickOutcome;

use crate::board::Lamp;
use crate::tasks::tick::TICK_SIGNAL;

#[embassy_executor::task]
pub async fn lamp_task(mut lamp: Lamp) {
    info!("Lamp task started");

    let mut waiting_for_time = false;

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        match lamp.tick(now_ms) {
            TickOutcome::Rendered {
                time,
                display_errors,
            } => {
                if waiting_for_time {
                    info!("Time available");
                    waiting_for_time = false;
                }
                debug!(
                    "Showing {}-{:02}-{:02} {:02}:{:02} {}",
                    time.year,
                    time.month,
                    time.day,
                    time.hour12(),
                    time.minute,
                    if time.is_am() { "AM" } else { "PM" }
                );
                if display_errors > 0 {
                    warn!("{} display(s) did not acknowledge", display_errors);
                }
            }
            TickOutcome::TimeUnavailable => {
                if !waiting_for_time {
                    warn!("Time not available, retrying every tick");
                    waiting_for_time = true;
                }
            }
            TickOutcome::NotInitialized => {
                trace!("Lamp not initialized");
            }
            TickOutcome::Waiting => {}
        }
    }
}
