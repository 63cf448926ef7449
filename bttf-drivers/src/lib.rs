//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in bttf-core:
//!
//! - TM1637 seven-segment display bus (bit-banged over any [`GpioBank`])
//!
//! [`GpioBank`]: bttf_core::traits::GpioBank

#![no_std]
#![deny(unsafe_code)]

pub mod tm1637;

pub use tm1637::Tm1637;
