//! Configuration loading and persistence
//!
//! Loads the config tree from flash or the defaults embedded at build
//! time, and saves it back when the lamp asks for it.

pub mod loader;

pub use loader::ConfigPersistence;
