//! Config store in the RP2040's external flash
//!
//! The last 64 KB of the 2 MB Pico flash hold a sequential-storage map;
//! `memory.x` keeps the firmware image out of that range.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use bttf_hal::flash::{FlashError, StorageKey};

/// Pico flash size
const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Size of the config partition at the end of flash
const CONFIG_SIZE: usize = 64 * 1024;

/// Flash range of the config map
pub const CONFIG_RANGE: core::ops::Range<u32> =
    ((FLASH_SIZE - CONFIG_SIZE) as u32)..(FLASH_SIZE as u32);

/// Scratch buffer size, one item plus its header
const ITEM_BUFFER: usize = 512;

/// Per-item overhead: key byte plus item header
const ITEM_OVERHEAD: usize = 8;

/// sequential-storage map over the config range
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    buffer: [u8; ITEM_BUFFER],
}

impl<'d> Rp2040FlashStorage<'d> {
    /// Take the flash with a DMA channel for async reads
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            buffer: [0; ITEM_BUFFER],
        }
    }
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::FullStorage => FlashError::Full,
        _ => FlashError::Storage,
    }
}

impl<'d> bttf_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let item = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut self.buffer,
            &key,
        )
        .await
        .map_err(storage_error)?
        .ok_or(FlashError::NotFound)?;

        let target = buffer
            .get_mut(..item.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(item);
        Ok(item.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > ITEM_BUFFER - ITEM_OVERHEAD {
            return Err(FlashError::BufferTooSmall);
        }
        map::store_item(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut self.buffer,
            &key,
            &data,
        )
        .await
        .map_err(storage_error)
    }
}
