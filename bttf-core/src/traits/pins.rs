//! Pin ownership
//!
//! GPIO pins are a shared namespace across everything the host runs.
//! Components claim the pins they use before touching them and release
//! them when they are done.

/// Usermod identifiers known to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsermodId {
    /// Time circuit lamp
    BttfLamp,
}

/// Owner tag attached to a claimed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinOwner {
    /// Reserved by the platform (flash, debug, on-board LED)
    System,
    /// Claimed by a usermod
    Usermod(UsermodId),
}

/// Errors from pin ownership operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range for this board
    InvalidPin,
    /// Pin already owned
    AlreadyOwned(PinOwner),
    /// Release attempted by someone other than the owner
    NotOwner(PinOwner),
    /// Release of a pin nobody owns
    NotClaimed,
    /// Ownership table is full
    TableFull,
}

/// Pin ownership arbitration
///
/// Claim and release are the only way to change ownership.
pub trait PinOwnership {
    /// Claim a pin for `owner`
    ///
    /// - `output`: whether the owner intends to drive the pin
    fn claim(&mut self, pin: u8, output: bool, owner: PinOwner) -> Result<(), PinError>;

    /// Release a pin previously claimed by `owner`
    fn release(&mut self, pin: u8, owner: PinOwner) -> Result<(), PinError>;

    /// Current owner of a pin, if any
    fn owner_of(&self, pin: u8) -> Option<PinOwner>;
}
