//! Board-agnostic core logic for the BTTF time circuit lamp
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Platform contract traits (pin ownership, GPIO, display bus, time source)
//! - Pin ownership registry
//! - Calendar time conversion
//! - Seven-segment encoding and display handles
//! - Lamp configuration types
//! - The time display driver and its host lifecycle hooks

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod lamp;
pub mod registry;
pub mod time;
pub mod traits;
