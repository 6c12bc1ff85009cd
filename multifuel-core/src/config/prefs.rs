//! Persisted display preferences
//!
//! Contrast and backlight survive power cycles in the [`ConfigStore`]. An
//! erased cell means the value was never saved and the default applies.

use multifuel_hal::{ConfigStore, Rgb, StorageKey};
use multifuel_protocol::UiPayload;

/// Contrast used when nothing was saved
pub const DEFAULT_CONTRAST: u8 = 5;

/// Backlight colour, with its right-justified 6-character label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: &'static [u8; 6],
    pub rgb: Rgb,
}

const fn entry(label: &'static [u8; 6], hex: u32) -> PaletteEntry {
    PaletteEntry {
        label,
        rgb: Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
    }
}

/// Backlight colours selectable from the module settings screen
pub static PALETTE: [PaletteEntry; 8] = [
    entry(b" White", 0xFFFFFF),
    entry(b"   Red", 0xFF0000),
    entry(b"  Blue", 0x0000FF),
    entry(b" Green", 0x00FF00),
    entry(b"Yellow", 0xFFFF00),
    entry(b"  Teal", 0x00FFFF),
    entry(b"Purple", 0x7F00FF),
    entry(b"Orange", 0xFF8C00),
];

/// Display preferences shared with the primary controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayPrefs {
    pub contrast: u8,
    pub backlight_on: bool,
    /// Index into [`PALETTE`]
    pub backlight_color: u8,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            backlight_on: true,
            backlight_color: 0,
        }
    }
}

impl DisplayPrefs {
    /// Load from the store, writing back a default contrast if unset
    pub fn load<S: ConfigStore>(store: &mut S) -> Self {
        let defaults = Self::default();

        let contrast = match store.read_set(StorageKey::Contrast) {
            Some(contrast) => contrast,
            None => {
                store.write(StorageKey::Contrast, defaults.contrast);
                defaults.contrast
            }
        };
        let backlight_on = store
            .read_set(StorageKey::BacklightEnabled)
            .map_or(defaults.backlight_on, |on| on != 0);
        let backlight_color = store
            .read_set(StorageKey::BacklightColor)
            .map_or(defaults.backlight_color, palette_index);

        Self {
            contrast,
            backlight_on,
            backlight_color,
        }
    }

    /// Persist every field that changed
    pub fn save<S: ConfigStore>(&self, store: &mut S) {
        let rgb = self.palette_entry().rgb;
        store.update(StorageKey::Contrast, self.contrast);
        store.update(StorageKey::BacklightEnabled, self.backlight_on as u8);
        store.update(StorageKey::BacklightColor, self.backlight_color);
        store.update(StorageKey::BacklightRed, rgb.r);
        store.update(StorageKey::BacklightGreen, rgb.g);
        store.update(StorageKey::BacklightBlue, rgb.b);
    }

    pub fn palette_entry(&self) -> &'static PaletteEntry {
        &PALETTE[palette_index(self.backlight_color) as usize]
    }

    /// Colour the backlight LEDs should show
    pub fn backlight_rgb(&self) -> Rgb {
        if self.backlight_on {
            self.palette_entry().rgb
        } else {
            Rgb::OFF
        }
    }

    /// Adopt a `GET_CONFIG` response
    pub fn apply_payload(&mut self, payload: &UiPayload) {
        self.contrast = payload.contrast;
        self.backlight_on = payload.backlight_on != 0;
        self.backlight_color = palette_index(payload.backlight_color);
    }

    /// Build a `SEND_INPUT_DATA` payload
    pub fn to_payload(&self, ui_mode: u8) -> UiPayload {
        UiPayload {
            contrast: self.contrast,
            ui_mode,
            backlight_on: self.backlight_on as u8,
            backlight_color: self.backlight_color,
        }
    }
}

/// Out-of-palette indices fall back to the first colour
pub fn palette_index(index: u8) -> u8 {
    if (index as usize) < PALETTE.len() {
        index
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_erased_store_yields_defaults() {
        let mut store = MemoryStore::new();
        let prefs = DisplayPrefs::load(&mut store);

        assert_eq!(prefs, DisplayPrefs::default());
        // Contrast default is written back
        assert_eq!(store.cell(StorageKey::Contrast), DEFAULT_CONTRAST);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let prefs = DisplayPrefs {
            contrast: 40,
            backlight_on: false,
            backlight_color: 6,
        };
        prefs.save(&mut store);

        assert_eq!(DisplayPrefs::load(&mut store), prefs);
        assert_eq!(store.cell(StorageKey::BacklightRed), 0x7F);
        assert_eq!(store.cell(StorageKey::BacklightBlue), 0xFF);
    }

    #[test]
    fn test_out_of_palette_color_falls_back() {
        let mut prefs = DisplayPrefs::default();
        prefs.apply_payload(&UiPayload {
            contrast: 9,
            ui_mode: 0,
            backlight_on: 1,
            backlight_color: 12,
        });
        assert_eq!(prefs.backlight_color, 0);
        assert_eq!(prefs.contrast, 9);
    }

    #[test]
    fn test_backlight_off_is_black() {
        let prefs = DisplayPrefs {
            backlight_on: false,
            ..DisplayPrefs::default()
        };
        assert_eq!(prefs.backlight_rgb(), Rgb::OFF);
        assert_eq!(DisplayPrefs::default().backlight_rgb(), Rgb::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_palette_labels_are_right_justified() {
        for entry in PALETTE.iter() {
            assert_ne!(entry.label[5], b' ');
        }
        assert_eq!(PALETTE[7].rgb, Rgb::new(0xFF, 0x8C, 0x00));
    }
}
