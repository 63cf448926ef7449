//! RP2040-specific HAL for the lamp firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `bttf-hal` traits and the `bttf-core` platform contracts:
//!
//! - Splitting the GPIO pins off the peripherals
//! - Number-addressed GPIO bank over `Flex` pins
//! - RTC-backed local time source
//! - Flash storage driver (implements `bttf_hal::FlashStorage`)

#![no_std]

pub mod flash;
pub mod gpio;
pub mod pins;
pub mod rtc;

// Re-export shared traits from bttf-hal for convenience
pub use bttf_hal::{FlashStorage as FlashStorageTrait, StorageKey};
