//! Source limit store
//!
//! The primary controller owns the authoritative limits. The local copy is
//! pulled on edit entry, changed one step at a time and pushed back.

use crate::catalog::{ScreenId, SettingField};
use multifuel_protocol::SettingsPayload;

/// Limits of one source, in whole device units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsRecord {
    pub screen: ScreenId,
    pub min_voltage: u8,
    pub max_voltage: u8,
    pub max_current: u8,
}

impl SettingsRecord {
    /// Defaults shown before the first pull
    pub const fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            min_voltage: 0,
            max_voltage: 55,
            max_current: 55,
        }
    }

    pub fn get(&self, field: SettingField) -> u8 {
        match field {
            SettingField::MinVoltage => self.min_voltage,
            SettingField::MaxVoltage => self.max_voltage,
            SettingField::MaxCurrent => self.max_current,
        }
    }

    pub fn set(&mut self, field: SettingField, value: u8) {
        match field {
            SettingField::MinVoltage => self.min_voltage = value,
            SettingField::MaxVoltage => self.max_voltage = value,
            SettingField::MaxCurrent => self.max_current = value,
        }
    }

    /// Decode a response; `None` if the screen id is unknown
    pub fn from_payload(payload: &SettingsPayload) -> Option<Self> {
        Some(Self {
            screen: ScreenId::from_u8(payload.screen_id)?,
            min_voltage: payload.min_voltage,
            max_voltage: payload.max_voltage,
            max_current: payload.max_current,
        })
    }

    pub fn to_payload(&self) -> SettingsPayload {
        SettingsPayload {
            screen_id: self.screen.as_u8(),
            min_voltage: self.min_voltage,
            max_voltage: self.max_voltage,
            max_current: self.max_current,
        }
    }
}

/// Limits for every screen
#[derive(Debug, Clone)]
pub struct SettingsStore {
    records: [SettingsRecord; ScreenId::COUNT],
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            records: ScreenId::ALL.map(SettingsRecord::new),
        }
    }

    pub fn get(&self, screen: ScreenId) -> &SettingsRecord {
        &self.records[screen.index()]
    }

    pub fn get_mut(&mut self, screen: ScreenId) -> &mut SettingsRecord {
        &mut self.records[screen.index()]
    }

    /// Replace the record for the screen the record names
    pub fn replace(&mut self, record: SettingsRecord) {
        self.records[record.screen.index()] = record;
    }
}
