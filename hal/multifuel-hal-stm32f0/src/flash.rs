//! Flash-backed preference store for STM32F0
//!
//! STM32F042 has 32KB flash with 1KB pages. The last two pages hold a
//! sequential-storage map with one item per [`StorageKey`]; it does the
//! wear levelling and corruption recovery.
//!
//! The UI writes preferences synchronously, so reads are served from a RAM
//! copy and writes only mark the cell dirty. The firmware calls
//! [`FlashStore::sync`] between UI steps to store the dirty cells.

use core::ops::Range;

use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_stm32::flash::{Blocking, Flash};
use multifuel_hal::store::{FlashError, ERASED};
use multifuel_hal::{ConfigStore, StorageKey};
use sequential_storage::cache::NoCache;
use sequential_storage::map;

/// Flash size of the STM32F042 parts
pub const FLASH_SIZE: usize = 32 * 1024;

/// Flash page size for STM32F0 series
pub const FLASH_PAGE_SIZE: usize = 1024;

/// Two pages, the least a map can rotate between
pub const CONFIG_PARTITION_SIZE: usize = 2 * FLASH_PAGE_SIZE;

pub const CONFIG_PARTITION_START: usize = FLASH_SIZE - CONFIG_PARTITION_SIZE;

/// Flash range for the config partition
pub const CONFIG_RANGE: Range<u32> = (CONFIG_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map item
const ITEM_BUFFER: usize = 32;

/// Preference store on the config partition
pub struct FlashStore<'d> {
    flash: BlockingAsync<Flash<'d, Blocking>>,
    cells: [u8; StorageKey::COUNT],
    /// Cells changed since the last sync, bit `n` for key `n`
    dirty: u8,
}

impl<'d> FlashStore<'d> {
    /// Read every stored preference; missing or unreadable ones stay erased
    pub async fn load(flash: Flash<'d, Blocking>) -> Self {
        let mut store = Self {
            flash: BlockingAsync::new(flash),
            cells: [ERASED; StorageKey::COUNT],
            dirty: 0,
        };

        for key in StorageKey::ALL {
            match store.fetch(key).await {
                Ok(Some(value)) => store.cells[key.as_u8() as usize] = value,
                Ok(None) => {}
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Preference {} unreadable: {}", key, _e);
                }
            }
        }

        store
    }

    /// Check if any cell is waiting for `sync`
    pub fn is_dirty(&self) -> bool {
        self.dirty != 0
    }

    /// Store every dirty cell
    ///
    /// A cell that fails stays dirty and is retried on the next call.
    pub async fn sync(&mut self) -> Result<(), FlashError> {
        for key in StorageKey::ALL {
            let bit = 1 << key.as_u8();
            if self.dirty & bit == 0 {
                continue;
            }

            let value = [self.cells[key.as_u8() as usize]];
            let mut buffer = [0u8; ITEM_BUFFER];
            map::store_item(
                &mut self.flash,
                CONFIG_RANGE,
                &mut NoCache::new(),
                &mut buffer,
                &key,
                &value.as_slice(),
            )
            .await
            .map_err(flash_error)?;

            self.dirty &= !bit;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Preferences stored");

        Ok(())
    }

    async fn fetch(&mut self, key: StorageKey) -> Result<Option<u8>, FlashError> {
        let mut buffer = [0u8; ITEM_BUFFER];
        let item = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
        )
        .await
        .map_err(flash_error)?;

        Ok(item.and_then(|data| data.first().copied()))
    }
}

fn flash_error<E>(error: sequential_storage::Error<E>) -> FlashError {
    match error {
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        _ => FlashError::Storage,
    }
}

impl ConfigStore for FlashStore<'_> {
    fn read(&mut self, key: StorageKey) -> u8 {
        self.cells[key.as_u8() as usize]
    }

    fn write(&mut self, key: StorageKey, value: u8) {
        self.cells[key.as_u8() as usize] = value;
        self.dirty |= 1 << key.as_u8();
    }
}
