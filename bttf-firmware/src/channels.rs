//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use bttf_core::config::ConfigRoot;

/// Config tree to persist (latest value wins)
pub static CONFIG_SAVE: Signal<CriticalSectionRawMutex, ConfigRoot> = Signal::new();
