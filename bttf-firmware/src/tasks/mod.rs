//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod config;
pub mod lamp;
pub mod tick;

pub use config::config_task;
pub use lamp::lamp_task;
pub use tick::tick_task;
