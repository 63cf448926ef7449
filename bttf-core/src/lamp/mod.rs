//! Time circuit lamp
//!
//! Renders the current date and local time onto three seven-segment
//! modules and lights the matching AM/PM lamp.

pub mod driver;

pub use driver::{LampSettings, TickOutcome, TimeDisplayDriver, BOOT_SETTLE_MS, LAMP_OWNER};
