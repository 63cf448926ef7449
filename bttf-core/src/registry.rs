//! Pin ownership registry
//!
//! Tracks which component owns each GPIO pin to prevent conflicts.

use heapless::FnvIndexMap;

use crate::traits::{PinError, PinOwner, PinOwnership};

/// Number of GPIO pins on the reference board (RP2040)
pub const GPIO_COUNT: u8 = 30;

/// Ownership record for a claimed pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinClaim {
    /// Owner tag
    pub owner: PinOwner,
    /// Claimed as an output
    pub output: bool,
}

/// Pin registry keyed by pin number
///
/// Each pin has at most one owner. A claim on a pin that is already
/// owned fails, even for the same owner.
pub struct PinRegistry {
    claims: FnvIndexMap<u8, PinClaim, 32>,
    pin_count: u8,
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PinRegistry {
    /// Create a registry for the reference board
    pub fn new() -> Self {
        Self::with_pin_count(GPIO_COUNT)
    }

    /// Create a registry for a board with `pin_count` pins (max 32)
    pub fn with_pin_count(pin_count: u8) -> Self {
        Self {
            claims: FnvIndexMap::new(),
            pin_count: pin_count.min(32),
        }
    }

    /// Reserve a pin for the platform itself
    pub fn reserve(&mut self, pin: u8) -> Result<(), PinError> {
        self.claim(pin, false, PinOwner::System)
    }

    /// Claim record for a pin
    pub fn claim_of(&self, pin: u8) -> Option<PinClaim> {
        self.claims.get(&pin).copied()
    }

    /// Check if a pin is owned by anyone
    pub fn is_claimed(&self, pin: u8) -> bool {
        self.claims.contains_key(&pin)
    }

    /// Number of pins held by `owner`
    pub fn claimed_by(&self, owner: PinOwner) -> usize {
        self.claims.values().filter(|c| c.owner == owner).count()
    }

    /// Total number of claimed pins
    pub fn claimed_count(&self) -> usize {
        self.claims.len()
    }
}

impl PinOwnership for PinRegistry {
    fn claim(&mut self, pin: u8, output: bool, owner: PinOwner) -> Result<(), PinError> {
        if pin >= self.pin_count {
            return Err(PinError::InvalidPin);
        }
        if let Some(existing) = self.claims.get(&pin) {
            return Err(PinError::AlreadyOwned(existing.owner));
        }
        self.claims
            .insert(pin, PinClaim { owner, output })
            .map_err(|_| PinError::TableFull)?;
        Ok(())
    }

    fn release(&mut self, pin: u8, owner: PinOwner) -> Result<(), PinError> {
        match self.claims.get(&pin) {
            None => Err(PinError::NotClaimed),
            Some(existing) if existing.owner != owner => Err(PinError::NotOwner(existing.owner)),
            Some(_) => {
                self.claims.remove(&pin);
                Ok(())
            }
        }
    }

    fn owner_of(&self, pin: u8) -> Option<PinOwner> {
        self.claims.get(&pin).map(|c| c.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::UsermodId;

    const LAMP: PinOwner = PinOwner::Usermod(UsermodId::BttfLamp);

    #[test]
    fn test_claim_and_release() {
        let mut registry = PinRegistry::new();

        assert!(registry.claim(11, true, LAMP).is_ok());
        assert_eq!(registry.owner_of(11), Some(LAMP));
        assert_eq!(
            registry.claim_of(11),
            Some(PinClaim {
                owner: LAMP,
                output: true
            })
        );

        // Can't claim same pin twice, not even as the same owner
        assert_eq!(
            registry.claim(11, true, LAMP),
            Err(PinError::AlreadyOwned(LAMP))
        );

        // Can claim different pin
        assert!(registry.claim(12, false, LAMP).is_ok());
        assert_eq!(registry.claimed_by(LAMP), 2);

        // Release and re-claim
        assert!(registry.release(11, LAMP).is_ok());
        assert!(!registry.is_claimed(11));
        assert!(registry.claim(11, true, LAMP).is_ok());
    }

    #[test]
    fn test_invalid_pin() {
        let mut registry = PinRegistry::new();
        assert_eq!(registry.claim(30, true, LAMP), Err(PinError::InvalidPin));
        assert_eq!(registry.claimed_count(), 0);

        let mut small = PinRegistry::with_pin_count(8);
        assert_eq!(small.claim(8, true, LAMP), Err(PinError::InvalidPin));
        assert!(small.claim(7, true, LAMP).is_ok());
    }

    #[test]
    fn test_release_requires_owner() {
        let mut registry = PinRegistry::new();
        registry.reserve(25).unwrap();

        assert_eq!(
            registry.release(25, LAMP),
            Err(PinError::NotOwner(PinOwner::System))
        );
        assert_eq!(registry.owner_of(25), Some(PinOwner::System));

        assert_eq!(registry.release(3, LAMP), Err(PinError::NotClaimed));
    }

    #[test]
    fn test_reserved_pin_blocks_usermod() {
        let mut registry = PinRegistry::new();
        registry.reserve(4).unwrap();

        assert_eq!(
            registry.claim(4, true, LAMP),
            Err(PinError::AlreadyOwned(PinOwner::System))
        );
        assert_eq!(registry.claimed_by(LAMP), 0);
        assert_eq!(registry.claimed_by(PinOwner::System), 1);
    }
}
