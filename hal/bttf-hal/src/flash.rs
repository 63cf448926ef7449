//! Flash storage abstractions
//!
//! Key-value storage for the persisted config tree. Chip HALs back it
//! with their own flash.

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Host config tree including the lamp namespace (postcard)
    LampConfig = 0,
}

impl StorageKey {
    /// Key byte as stored in flash
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Key for a stored byte, `None` for keys this firmware does not know
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::LampConfig),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Storage layer failed
    Storage,
    /// Key not found
    NotFound,
    /// Value does not fit the buffer or the item size
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Wear-leveled key-value store
pub trait FlashStorage {
    /// Read the value for `key` into `buffer`
    ///
    /// Returns the number of bytes read.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Store `data` under `key`, replacing any previous value
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bytes() {
        assert_eq!(StorageKey::LampConfig.as_u8(), 0);
        assert_eq!(StorageKey::from_u8(0), Some(StorageKey::LampConfig));
        assert_eq!(StorageKey::from_u8(1), None);
    }
}
