//! Screen catalog
//!
//! Every screen the unit can show, with its normal and settings templates.
//! The catalog is static: screens are a closed enum and every lookup is a
//! `match`, so there is nothing to initialise or mutate at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen identifiers
///
/// The discriminant is the screen id used on the wire and the index into
/// the per-screen stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ScreenId {
    BattInternal = 0,
    BattExternal = 1,
    LeadAcid = 2,
    Lipo = 3,
    Generator = 4,
    AcDc = 5,
    Solar = 6,
    Charger = 7,
    DcDc = 8,
    LeadStepUp = 9,
    VarDc = 10,
    Inverter = 11,
    Summary = 12,
    Main = 13,
}

impl ScreenId {
    /// Number of screens
    pub const COUNT: usize = 14;

    /// All screens in id order
    pub const ALL: [ScreenId; Self::COUNT] = [
        ScreenId::BattInternal,
        ScreenId::BattExternal,
        ScreenId::LeadAcid,
        ScreenId::Lipo,
        ScreenId::Generator,
        ScreenId::AcDc,
        ScreenId::Solar,
        ScreenId::Charger,
        ScreenId::DcDc,
        ScreenId::LeadStepUp,
        ScreenId::VarDc,
        ScreenId::Inverter,
        ScreenId::Summary,
        ScreenId::Main,
    ];

    /// Get the id as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create an id from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Index into per-screen tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns true for screens backed by a power source
    pub fn is_source(self) -> bool {
        !matches!(self, ScreenId::Summary | ScreenId::Main)
    }

    /// Highest selectable line in settings mode
    pub fn max_line(self) -> u8 {
        match self {
            ScreenId::Main => 2,
            _ => 3,
        }
    }

    /// Name shown in the title row
    pub fn title(self) -> &'static [u8] {
        match self {
            ScreenId::BattInternal => b"BATT (INT)",
            ScreenId::BattExternal => b"BATT (EXT)",
            ScreenId::LeadAcid => b"Lead Acid",
            ScreenId::Lipo => b"6S Lipo",
            ScreenId::Generator => b"Generator",
            ScreenId::AcDc => b"ACDC",
            ScreenId::Solar => b"Solar Charger",
            ScreenId::Charger => b"Battery Charger",
            ScreenId::DcDc => b"DCDC",
            ScreenId::LeadStepUp => b"12V Stepup",
            ScreenId::VarDc => b"Variable DC",
            ScreenId::Inverter => b"Inverter",
            ScreenId::Summary => b"Unit Summary",
            ScreenId::Main => b"Multifuel Unit",
        }
    }

    /// Name shown in the settings menu
    pub fn menu_name(self) -> &'static [u8] {
        match self {
            ScreenId::BattInternal => b"BATT(INT) Settings",
            ScreenId::BattExternal => b"BATT(EXT) Settings",
            ScreenId::LeadAcid => b"Lead Settings",
            ScreenId::Lipo => b"Lipo Settings",
            ScreenId::Generator => b"Generator Settings",
            ScreenId::AcDc => b"ACDC Settings",
            ScreenId::Solar => b"Solar Settings",
            ScreenId::Charger => b"Charger Settings",
            ScreenId::DcDc => b"DCDC Settings",
            ScreenId::LeadStepUp => b"Lead Step Settings",
            ScreenId::VarDc => b"VARDC Settings",
            ScreenId::Inverter => b"Inverter Settings",
            ScreenId::Summary => b"Module Settings",
            ScreenId::Main => b"Main Settings",
        }
    }

    /// Template used while browsing
    pub fn template(self) -> &'static Template {
        match self {
            ScreenId::BattInternal
            | ScreenId::BattExternal
            | ScreenId::LeadAcid
            | ScreenId::Lipo => &BATTERY,
            ScreenId::VarDc => &VARIABLE_DC,
            ScreenId::Inverter => &INVERTER,
            ScreenId::Summary => &SUMMARY,
            ScreenId::Main => &MAIN,
            _ => &SOURCE,
        }
    }

    /// Template used in settings mode
    pub fn settings_template(self) -> &'static Template {
        match self {
            ScreenId::Main => &MAIN_SETTINGS,
            ScreenId::Summary => &MODULE_SETTINGS,
            _ => &SOURCE_SETTINGS,
        }
    }
}

/// Editable limit of a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingField {
    MinVoltage,
    MaxVoltage,
    MaxCurrent,
}

impl SettingField {
    /// Field edited on settings line 1..=3
    pub fn for_line(line: u8) -> Option<Self> {
        match line {
            1 => Some(SettingField::MinVoltage),
            2 => Some(SettingField::MaxVoltage),
            3 => Some(SettingField::MaxCurrent),
            _ => None,
        }
    }

    pub fn label(self) -> &'static [u8] {
        match self {
            SettingField::MinVoltage => b"Min Voltage",
            SettingField::MaxVoltage => b"Max Voltage",
            SettingField::MaxCurrent => b"Max Current",
        }
    }

    pub fn unit(self) -> u8 {
        match self {
            SettingField::MaxCurrent => b'A',
            _ => b'V',
        }
    }
}

/// Aggregate shown on the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SummaryField {
    ActiveInputs,
    MaxTemperature,
    MaxCurrent,
}

/// Unit-wide display setting on the module settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitField {
    Backlight,
    Color,
    Contrast,
}

/// Semantic type of one display row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineType {
    /// Page number and source name
    Title,
    /// Title with a right-justified state-of-charge percentage
    TitleWithPercentage,
    /// Status text
    Status,
    /// Input voltage and current
    DcPair,
    /// Variable DC output voltage and current
    VarDcPair,
    /// Inverter power
    AcPower,
    /// Unit-wide voltage, current and power on the main screen
    PropertiesMain,
    /// Board temperature
    Properties,
    /// Pre-baked text
    Fixed(&'static [u8]),
    /// Summary aggregate
    Summary(SummaryField),
    /// Source limit in settings mode
    Setting(SettingField),
    /// Page selected by the settings menu cursor
    MenuPage,
    /// Settings name of the selected page
    MenuName,
    /// Module setting
    Unit(UnitField),
}

/// Four rows of a screen
pub type Template = [LineType; 4];

static BATTERY: Template = [
    LineType::TitleWithPercentage,
    LineType::Status,
    LineType::DcPair,
    LineType::Properties,
];

static SOURCE: Template = [
    LineType::Title,
    LineType::Status,
    LineType::DcPair,
    LineType::Properties,
];

static VARIABLE_DC: Template = [
    LineType::Title,
    LineType::Status,
    LineType::VarDcPair,
    LineType::Properties,
];

static INVERTER: Template = [
    LineType::Title,
    LineType::Status,
    LineType::AcPower,
    LineType::Properties,
];

static MAIN: Template = [
    LineType::Fixed(b" Multifuel Unit"),
    LineType::Status,
    LineType::Fixed(b"   VARDC   Inverter"),
    LineType::PropertiesMain,
];

static SUMMARY: Template = [
    LineType::Title,
    LineType::Summary(SummaryField::ActiveInputs),
    LineType::Summary(SummaryField::MaxTemperature),
    LineType::Summary(SummaryField::MaxCurrent),
];

static SOURCE_SETTINGS: Template = [
    LineType::Title,
    LineType::Setting(SettingField::MinVoltage),
    LineType::Setting(SettingField::MaxVoltage),
    LineType::Setting(SettingField::MaxCurrent),
];

static MAIN_SETTINGS: Template = [
    LineType::Fixed(b"   Settings Menu"),
    LineType::Fixed(b" Go back to main"),
    LineType::MenuPage,
    LineType::MenuName,
];

static MODULE_SETTINGS: Template = [
    LineType::Fixed(b"00) Module Settings"),
    LineType::Unit(UnitField::Backlight),
    LineType::Unit(UnitField::Color),
    LineType::Unit(UnitField::Contrast),
];

/// Rows painted while waiting for the primary controller
pub static STARTUP_LINES: [&[u8]; 4] = [
    b" Multifuel Unit",
    b"Setting up unit",
    b"Ensure no loads are",
    b"connected",
];

#[cfg(test)]
mod tests {
    use super::*;
    use multifuel_display::SCREEN_COLS;

    #[test]
    fn test_id_roundtrip() {
        for screen in ScreenId::ALL {
            assert_eq!(ScreenId::from_u8(screen.as_u8()), Some(screen));
        }
        assert_eq!(ScreenId::from_u8(14), None);
        assert_eq!(ScreenId::from_u8(0xFF), None);
    }

    #[test]
    fn test_max_line() {
        assert_eq!(ScreenId::Main.max_line(), 2);
        assert_eq!(ScreenId::Summary.max_line(), 3);
        assert_eq!(ScreenId::Lipo.max_line(), 3);
    }

    #[test]
    fn test_names_fit_their_rows() {
        for screen in ScreenId::ALL {
            // "NN) " prefix
            assert!(screen.title().len() <= SCREEN_COLS - 4);
            // " ~" prefix
            assert!(screen.menu_name().len() <= SCREEN_COLS - 2);
        }
    }

    #[test]
    fn test_fixed_lines_fit() {
        for screen in ScreenId::ALL {
            for line in screen.template().iter().chain(screen.settings_template()) {
                if let LineType::Fixed(text) = line {
                    assert!(text.len() <= SCREEN_COLS);
                }
            }
        }
        assert!(STARTUP_LINES.iter().all(|l| l.len() <= SCREEN_COLS));
    }

    #[test]
    fn test_source_templates() {
        assert_eq!(ScreenId::Lipo.template()[0], LineType::TitleWithPercentage);
        assert_eq!(ScreenId::Solar.template()[0], LineType::Title);
        assert_eq!(ScreenId::Inverter.template()[2], LineType::AcPower);
        assert_eq!(ScreenId::VarDc.template()[2], LineType::VarDcPair);
        assert!(!ScreenId::Main.is_source());
        assert!(ScreenId::DcDc.is_source());
    }

    #[test]
    fn test_setting_field_lines() {
        assert_eq!(SettingField::for_line(1), Some(SettingField::MinVoltage));
        assert_eq!(SettingField::for_line(3), Some(SettingField::MaxCurrent));
        assert_eq!(SettingField::for_line(0), None);
        assert_eq!(SettingField::for_line(4), None);
    }
}
