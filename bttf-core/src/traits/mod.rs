//! Platform contract traits
//!
//! These traits define the interface between the lamp logic and the
//! host platform it runs on. The driver only ever touches hardware
//! through them.

pub mod clock;
pub mod display;
pub mod gpio;
pub mod pins;
pub mod usermod;

pub use clock::LocalTimeSource;
pub use display::{DisplayError, SegmentBus};
pub use gpio::{GpioBank, Level};
pub use pins::{PinError, PinOwner, PinOwnership, UsermodId};
pub use usermod::Usermod;

/// Everything the lamp driver needs from its host
///
/// Boards implement the individual traits; this bundle is picked up
/// automatically.
pub trait Platform: PinOwnership + GpioBank + SegmentBus + LocalTimeSource {}

// Blanket implementation for types that implement every contract
impl<T: PinOwnership + GpioBank + SegmentBus + LocalTimeSource> Platform for T {}
