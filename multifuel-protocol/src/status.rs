//! Source status codes reported by the primary controller

/// Operating status of one power source
///
/// Wire values follow the primary controller's enumeration. Unknown bytes
/// decode to [`SourceStatus::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceStatus {
    /// No module detected in this slot
    #[default]
    NotFound,
    /// Module present but switched off
    Disabled,
    /// Module present and delivering power
    Enabled,
    /// Tripped on over-voltage
    DisabledOverVoltage,
    /// Tripped on under-voltage
    DisabledUnderVoltage,
    /// Tripped on over-current
    DisabledOverCurrent,
    /// Tripped on over-temperature
    DisabledOverTemperature,
    /// Latched fault, needs a reset
    ResetRequired,
    /// Whole unit healthy (main screen)
    UnitOk,
    /// No source connected (main screen)
    NoSources,
}

// Wire format values
const STATUS_NOT_FOUND: u8 = 0;
const STATUS_DISABLED: u8 = 1;
const STATUS_ENABLED: u8 = 2;
const STATUS_OV: u8 = 3;
const STATUS_UV: u8 = 4;
const STATUS_OC: u8 = 5;
const STATUS_OT: u8 = 6;
const STATUS_RESET_REQUIRED: u8 = 7;
const STATUS_UNIT_OK: u8 = 8;
const STATUS_NO_SOURCES: u8 = 9;

impl SourceStatus {
    /// Parse a status from its wire byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            STATUS_DISABLED => SourceStatus::Disabled,
            STATUS_ENABLED => SourceStatus::Enabled,
            STATUS_OV => SourceStatus::DisabledOverVoltage,
            STATUS_UV => SourceStatus::DisabledUnderVoltage,
            STATUS_OC => SourceStatus::DisabledOverCurrent,
            STATUS_OT => SourceStatus::DisabledOverTemperature,
            STATUS_RESET_REQUIRED => SourceStatus::ResetRequired,
            STATUS_UNIT_OK => SourceStatus::UnitOk,
            STATUS_NO_SOURCES => SourceStatus::NoSources,
            _ => SourceStatus::NotFound,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            SourceStatus::NotFound => STATUS_NOT_FOUND,
            SourceStatus::Disabled => STATUS_DISABLED,
            SourceStatus::Enabled => STATUS_ENABLED,
            SourceStatus::DisabledOverVoltage => STATUS_OV,
            SourceStatus::DisabledUnderVoltage => STATUS_UV,
            SourceStatus::DisabledOverCurrent => STATUS_OC,
            SourceStatus::DisabledOverTemperature => STATUS_OT,
            SourceStatus::ResetRequired => STATUS_RESET_REQUIRED,
            SourceStatus::UnitOk => STATUS_UNIT_OK,
            SourceStatus::NoSources => STATUS_NO_SOURCES,
        }
    }

    /// Returns true if the source tripped on a protection limit
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            SourceStatus::DisabledOverVoltage
                | SourceStatus::DisabledUnderVoltage
                | SourceStatus::DisabledOverCurrent
                | SourceStatus::DisabledOverTemperature
                | SourceStatus::ResetRequired
        )
    }
}
