//! Edit targets and step rules
//!
//! Cursors wrap; values clamp. A rotation of any size moves a value by one
//! unit in its direction.

use crate::catalog::{ScreenId, SettingField, UnitField};

/// Boolean module setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitFlag {
    Backlight,
}

/// What the encoder changes in `SettingsEdit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditTarget {
    /// Source limit
    Numeric(ScreenId, SettingField),
    /// Module on/off setting
    Boolean(UnitFlag),
    /// Backlight palette index
    BacklightColor,
    /// LCD contrast
    Contrast,
    /// Page picked by the main settings menu
    MenuPage,
}

impl EditTarget {
    /// Target under the cursor, if the line is editable
    pub fn resolve(screen: ScreenId, line: u8) -> Option<Self> {
        match screen {
            ScreenId::Main => (line == 2).then_some(EditTarget::MenuPage),
            ScreenId::Summary => match line {
                1 => Some(Self::from(UnitField::Backlight)),
                2 => Some(Self::from(UnitField::Color)),
                3 => Some(Self::from(UnitField::Contrast)),
                _ => None,
            },
            source => SettingField::for_line(line).map(|field| EditTarget::Numeric(source, field)),
        }
    }
}

impl From<UnitField> for EditTarget {
    fn from(field: UnitField) -> Self {
        match field {
            UnitField::Backlight => EditTarget::Boolean(UnitFlag::Backlight),
            UnitField::Color => EditTarget::BacklightColor,
            UnitField::Contrast => EditTarget::Contrast,
        }
    }
}

/// Move `value` one unit in the direction of `step`, held within `0..=max`
pub fn clamp_step(value: u8, step: i8, max: u8) -> u8 {
    let next = match step.signum() {
        1 => value.saturating_add(1),
        -1 => value.saturating_sub(1),
        _ => value,
    };
    next.min(max)
}

/// Move `value` one unit in the direction of `step` within `min..=max`,
/// wrapping past either end
pub fn wrap_step(value: u8, step: i8, min: u8, max: u8) -> u8 {
    if max <= min {
        return min;
    }
    match step.signum() {
        1 if value >= max => min,
        1 => value + 1,
        -1 if value <= min => max,
        -1 => value - 1,
        _ => value.clamp(min, max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_main() {
        assert_eq!(EditTarget::resolve(ScreenId::Main, 1), None);
        assert_eq!(
            EditTarget::resolve(ScreenId::Main, 2),
            Some(EditTarget::MenuPage)
        );
    }

    #[test]
    fn test_resolve_module_settings() {
        assert_eq!(
            EditTarget::resolve(ScreenId::Summary, 1),
            Some(EditTarget::Boolean(UnitFlag::Backlight))
        );
        assert_eq!(
            EditTarget::resolve(ScreenId::Summary, 2),
            Some(EditTarget::BacklightColor)
        );
        assert_eq!(
            EditTarget::resolve(ScreenId::Summary, 3),
            Some(EditTarget::Contrast)
        );
    }

    #[test]
    fn test_resolve_source() {
        assert_eq!(
            EditTarget::resolve(ScreenId::Lipo, 2),
            Some(EditTarget::Numeric(ScreenId::Lipo, SettingField::MaxVoltage))
        );
        assert_eq!(EditTarget::resolve(ScreenId::Lipo, 4), None);
    }

    #[test]
    fn test_clamp_step_edges() {
        assert_eq!(clamp_step(0, -1, 58), 0);
        assert_eq!(clamp_step(58, 1, 58), 58);
        assert_eq!(clamp_step(57, 7, 58), 58);
        assert_eq!(clamp_step(255, 1, 255), 255);
        // Out-of-range value from the remote is pulled back in
        assert_eq!(clamp_step(70, -1, 58), 58);
    }

    #[test]
    fn test_wrap_step_edges() {
        assert_eq!(wrap_step(3, 1, 1, 3), 1);
        assert_eq!(wrap_step(1, -1, 1, 3), 3);
        assert_eq!(wrap_step(2, 1, 1, 3), 3);
        assert_eq!(wrap_step(0, -1, 0, 7), 7);
        assert_eq!(wrap_step(5, 0, 1, 3), 3);
    }

    proptest! {
        #[test]
        fn prop_clamp_moves_one_unit(value in 0u8..=58, step in any::<i8>()) {
            let next = clamp_step(value, step, 58);
            prop_assert!(next <= 58);
            prop_assert!((next as i16 - value as i16).abs() <= 1);
            if step == 0 {
                prop_assert_eq!(next, value);
            }
        }

        #[test]
        fn prop_wrap_stays_in_range(value in 1u8..=3, step in any::<i8>()) {
            let next = wrap_step(value, step, 1, 3);
            prop_assert!((1..=3).contains(&next));
        }
    }
}
