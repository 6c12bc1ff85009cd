//! Persistent preference storage
//!
//! A flat byte store holding the last contrast and backlight values. Every
//! entry is a single byte; an erased cell reads back as [`ERASED`].

/// Value of a storage cell that has never been written
pub const ERASED: u8 = 0xFF;

/// Storage keys for persisted preferences
///
/// The discriminant is the cell offset inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Backlight red channel duty
    BacklightRed = 0,
    /// Backlight green channel duty
    BacklightGreen = 1,
    /// Backlight blue channel duty
    BacklightBlue = 2,
    /// LCD contrast duty
    Contrast = 3,
    /// Backlight enabled flag (0 or 1)
    BacklightEnabled = 4,
    /// Backlight palette index
    BacklightColor = 5,
}

impl StorageKey {
    /// Number of cells a store must provide
    pub const COUNT: usize = 6;

    /// All keys in offset order
    pub const ALL: [StorageKey; Self::COUNT] = [
        StorageKey::BacklightRed,
        StorageKey::BacklightGreen,
        StorageKey::BacklightBlue,
        StorageKey::Contrast,
        StorageKey::BacklightEnabled,
        StorageKey::BacklightColor,
    ];

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Errors from persisting preferences to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash or storage layer operation failed
    Storage,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Byte-addressable preference store
///
/// Reads never fail: a missing or unreadable cell reports [`ERASED`] and
/// the caller substitutes its default.
pub trait ConfigStore {
    /// Read the byte stored under `key`
    fn read(&mut self, key: StorageKey) -> u8;

    /// Store `value` under `key`
    fn write(&mut self, key: StorageKey, value: u8);

    /// Read `key`, returning `None` when the cell is erased
    fn read_set(&mut self, key: StorageKey) -> Option<u8> {
        match self.read(key) {
            ERASED => None,
            value => Some(value),
        }
    }

    /// Write `value` only when it differs from what is stored
    ///
    /// Flash-backed stores spend a map item on every write.
    fn update(&mut self, key: StorageKey, value: u8) {
        if self.read(key) != value {
            self.write(key, value);
        }
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let Some(slot) = buffer.first_mut() else {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        };
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let Some(&byte) = buffer.first() else {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        };
        StorageKey::from_u8(byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Cells([u8; StorageKey::COUNT], usize);

    impl ConfigStore for Cells {
        fn read(&mut self, key: StorageKey) -> u8 {
            self.0[key as usize]
        }

        fn write(&mut self, key: StorageKey, value: u8) {
            self.0[key as usize] = value;
            self.1 += 1;
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for key in StorageKey::ALL {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::from_u8(StorageKey::COUNT as u8), None);
    }

    #[test]
    fn test_erased_reads_as_unset() {
        let mut cells = Cells([ERASED; StorageKey::COUNT], 0);
        assert_eq!(cells.read_set(StorageKey::Contrast), None);
        cells.write(StorageKey::Contrast, 5);
        assert_eq!(cells.read_set(StorageKey::Contrast), Some(5));
    }

    #[test]
    fn test_update_skips_identical_value() {
        let mut cells = Cells([ERASED; StorageKey::COUNT], 0);
        cells.update(StorageKey::BacklightColor, 3);
        cells.update(StorageKey::BacklightColor, 3);
        assert_eq!(cells.1, 1);
    }

    #[cfg(feature = "sequential-storage")]
    #[test]
    fn test_map_key_is_one_byte() {
        use sequential_storage::map::{Key, SerializationError};

        let mut buffer = [0u8; 4];
        assert!(matches!(StorageKey::Contrast.serialize_into(&mut buffer), Ok(1)));
        assert!(matches!(
            StorageKey::deserialize_from(&buffer),
            Ok((StorageKey::Contrast, 1))
        ));
        assert!(matches!(
            StorageKey::Contrast.serialize_into(&mut []),
            Err(SerializationError::BufferTooSmall)
        ));
        assert!(matches!(
            StorageKey::deserialize_from(&[StorageKey::COUNT as u8]),
            Err(SerializationError::InvalidFormat)
        ));
    }
}
