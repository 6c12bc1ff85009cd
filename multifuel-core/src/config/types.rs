//! UI configuration type definitions

use heapless::Vec;

use crate::catalog::ScreenId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default 7-bit address of the primary controller
pub const DEFAULT_PRIMARY_ADDRESS: u8 = 0x72;

/// Highest value a source limit can be edited to
pub const DEFAULT_SETTING_MAX: u8 = 58;

/// Screens reachable by browsing, in browse order
pub type ScreenList = Vec<ScreenId, { ScreenId::COUNT }>;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A timing interval is zero
    ZeroInterval,
    /// Cursor blink is not faster than the repaint
    BlinkNotShorter,
    /// Fewer than two screens to browse
    EmptyScreenList,
    /// The browse list must start with the main screen
    MainNotFirst,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// 7-bit bus address of the primary controller
    pub primary_address: u8,
    /// Minimum time between repaint cycles (ms)
    pub update_interval_ms: u32,
    /// Cursor blink half-period (ms)
    pub blink_interval_ms: u32,
    /// Time between presence checks (ms)
    pub presence_interval_ms: u32,
    /// Presence checks at startup before giving up on the primary controller
    pub startup_attempts: u8,
    /// Delay between startup presence checks (ms)
    pub startup_interval_ms: u32,
    /// Ceiling for edited source limits
    pub setting_max: u8,
    /// Browse order, starting with `Main`
    pub screens: ScreenList,
}

impl Default for UiConfig {
    fn default() -> Self {
        let mut screens = ScreenList::new();
        let _ = screens.push(ScreenId::Main);
        let _ = screens.push(ScreenId::Summary);
        for screen in ScreenId::ALL.iter().take(9) {
            let _ = screens.push(*screen);
        }

        Self {
            primary_address: DEFAULT_PRIMARY_ADDRESS,
            update_interval_ms: 250,
            blink_interval_ms: 100,
            presence_interval_ms: 1000,
            startup_attempts: 10,
            startup_interval_ms: 200,
            setting_max: DEFAULT_SETTING_MAX,
            screens,
        }
    }
}

impl UiConfig {
    /// Check the invariants the UI relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_ms == 0
            || self.blink_interval_ms == 0
            || self.presence_interval_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }
        if self.blink_interval_ms >= self.update_interval_ms {
            return Err(ConfigError::BlinkNotShorter);
        }
        if self.screens.len() < 2 {
            return Err(ConfigError::EmptyScreenList);
        }
        if self.screens.first() != Some(&ScreenId::Main) {
            return Err(ConfigError::MainNotFirst);
        }
        Ok(())
    }

    /// Source screens in the browse list
    pub fn source_screens(&self) -> impl Iterator<Item = ScreenId> + '_ {
        self.screens.iter().copied().filter(|screen| screen.is_source())
    }
}
