//! Host lifecycle hooks
//!
//! A usermod is a plugin unit the host firmware calls into from its
//! setup, loop and config code paths.

use crate::config::ConfigRoot;
use crate::traits::UsermodId;

/// Host lifecycle for a usermod
///
/// The host calls `read_from_config` before `setup`, then `tick` on
/// every scheduler pass. `add_to_config` is called whenever the host
/// persists its configuration.
pub trait Usermod {
    /// Result of one scheduler pass
    type Outcome;

    /// Usermod identifier
    fn id(&self) -> UsermodId;

    /// One-time initialization at boot
    fn setup(&mut self, now_ms: u64);

    /// Scheduler pass
    fn tick(&mut self, now_ms: u64) -> Self::Outcome;

    /// Store persistent properties into the host config
    fn add_to_config(&self, root: &mut ConfigRoot);

    /// Load persistent properties from the host config
    ///
    /// Returns false if the config did not contain everything this
    /// usermod stores, so the host knows defaults were applied.
    fn read_from_config(&mut self, root: &ConfigRoot, now_ms: u64) -> bool;
}
