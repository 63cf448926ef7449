//! Seven-segment display support
//!
//! Digit encoding plus the lightweight handle the lamp keeps for each
//! display module.

pub mod handle;
pub mod segments;

pub use handle::SegmentDisplay;
pub use segments::{DisplayValue, Segments};
