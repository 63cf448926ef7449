//! Configuration types
//!
//! Board-agnostic configuration structures. The host keeps them in
//! flash as postcard binary data; the firmware's compiled-in defaults
//! are written in TOML using the same key names.

pub mod lamp;

pub use lamp::*;
