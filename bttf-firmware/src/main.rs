//! BTTF Lamp - Time Circuit Display Firmware
//!
//! Main firmware binary for an RP2040-based time circuit lamp. Shows
//! the year, date and time on three TM1637 displays and lights the AM
//! or PM lamp, the way the time circuits do in the film.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use bttf_core::lamp::{TimeDisplayDriver, LAMP_OWNER};
use bttf_core::traits::Usermod;
use bttf_hal_rp2040::flash::Rp2040FlashStorage;
use bttf_hal_rp2040::pins;
use bttf_hal_rp2040::rtc::RtcTime;

use crate::board::LampBoard;
use crate::channels::CONFIG_SAVE;
use crate::config::ConfigPersistence;

mod board;
mod channels;
mod config;
mod tasks;

/// Build time as Unix seconds, used when the RTC has not been set
const BUILD_UNIX: &str = env!("BTTF_BUILD_UNIX");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BTTF lamp firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let (mut pin_bank, rest) = pins::split(p);
    info!("Peripherals initialized");

    // Load configuration from flash (or use embedded defaults)
    let storage = Rp2040FlashStorage::new(rest.flash, rest.dma_ch0);
    let mut persistence = ConfigPersistence::new(storage);
    let mut root = persistence.load_or_default().await;

    // Wall clock
    let mut clock = RtcTime::new(rest.rtc, root.time.utc_offset_h);
    if !clock.is_running() {
        seed_clock(&mut clock);
    }

    let board = LampBoard::new(&mut pin_bank, clock);
    let mut lamp = TimeDisplayDriver::new(board);

    let now_ms = Instant::now().as_millis();
    if !lamp.read_from_config(&root, now_ms) {
        info!("Lamp settings incomplete, saving defaults");
        lamp.add_to_config(&mut root);
        CONFIG_SAVE.signal(root);
    }
    info!("Lamp settings: {}", lamp.settings());

    lamp.setup(now_ms);
    let claimed = lamp.platform().claimed_by(LAMP_OWNER);
    if claimed < 6 {
        warn!("Lamp holds only {} of 6 pins", claimed);
    }

    // Spawn tasks
    unwrap!(spawner.spawn(tasks::config_task(persistence)));
    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::lamp_task(lamp)));

    info!("All tasks spawned, firmware running");
}

/// Set an unset RTC to the build time
///
/// Only a fallback: the clock will be off by however long the firmware
/// sat between build and boot.
fn seed_clock(clock: &mut RtcTime) {
    let Ok(secs) = BUILD_UNIX.parse::<i64>() else {
        warn!("Build time unavailable, RTC left unset");
        return;
    };
    match clock.set_unix(secs) {
        Ok(()) => info!("RTC was not running, seeded from build time {}", secs),
        Err(e) => warn!("Failed to seed RTC: {:?}", e),
    }
}
