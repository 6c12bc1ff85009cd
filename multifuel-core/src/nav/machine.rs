//! Navigation state machine definition
//!
//! What the display shows is a function of the current state; the state
//! only changes in response to a [`NavigationEvent`].

use multifuel_display::NavigationEvent;

use super::edit::{wrap_step, EditTarget};
use crate::catalog::ScreenId;

/// UI modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    /// Left/right flip through telemetry screens
    Browse,
    /// A settings screen with a steady cursor
    SettingsList,
    /// The value under the blinking cursor follows the encoder
    SettingsEdit,
}

impl UiMode {
    /// Wire value sent to the primary controller
    pub fn to_byte(self) -> u8 {
        match self {
            UiMode::Browse => 0,
            UiMode::SettingsList => 1,
            UiMode::SettingsEdit => 2,
        }
    }

    /// Check if a settings template is shown
    pub fn is_settings(&self) -> bool {
        !matches!(self, UiMode::Browse)
    }
}

/// Work the controller performs after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Active screen changed; repaint everything
    ScreenChanged,
    /// Mode changed between browsing and settings; repaint and notify
    ModeChanged,
    /// Settings cursor moved off `from`
    CursorMoved { from: u8 },
    /// Edit started on a target; pull fresh values
    BeginEdit(EditTarget),
    /// Apply one step to a target
    Edit { target: EditTarget, step: i8 },
    /// Edit finished; cursor stops blinking
    EndEdit,
}

/// Navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationState {
    /// Screen on the display
    pub active: ScreenId,
    pub mode: UiMode,
    /// Selected settings line, `1..=active.max_line()`
    pub current_line: u8,
    /// Index into the browse list picked by "Go to page"; never 0 (Main)
    pub menu_cursor: u8,
    /// Index of `active` in the browse list while browsing
    pub page_index: u8,
    /// Cursor blinks while editing
    pub blink_enabled: bool,
    /// Blink phase
    pub cursor_visible: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Browsing the main screen
    pub const fn new() -> Self {
        Self {
            active: ScreenId::Main,
            mode: UiMode::Browse,
            current_line: 1,
            menu_cursor: 1,
            page_index: 0,
            blink_enabled: false,
            cursor_visible: true,
        }
    }

    /// Back to browsing the main screen, settings closed
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Editable target under the cursor
    pub fn edit_target(&self) -> Option<EditTarget> {
        EditTarget::resolve(self.active, self.current_line)
    }

    /// Process an event
    ///
    /// `screens` is the browse list; its first entry is `Main`.
    pub fn handle(&mut self, event: NavigationEvent, screens: &[ScreenId]) -> Option<Effect> {
        use NavigationEvent::*;
        use UiMode::*;

        match (self.mode, event) {
            (Browse, Menu) => {
                self.mode = SettingsList;
                self.active = ScreenId::Main;
                self.current_line = 1;
                self.menu_cursor = 1;
                self.stop_blink();
                Some(Effect::ModeChanged)
            }
            (Browse, Select) => None,
            (Browse, _) => self.rotate_screen(event.step(), screens),

            (SettingsList, Menu) => {
                let target = self.edit_target()?;
                self.mode = SettingsEdit;
                self.blink_enabled = true;
                self.cursor_visible = true;
                Some(Effect::BeginEdit(target))
            }
            (SettingsEdit, Menu) => {
                self.mode = SettingsList;
                self.stop_blink();
                Some(Effect::EndEdit)
            }

            (SettingsList | SettingsEdit, Select) => self.select(screens),

            (SettingsList, _) => {
                let step = event.step();
                if step == 0 {
                    return None;
                }
                let from = self.current_line;
                self.current_line = wrap_step(from, step, 1, self.active.max_line());
                Some(Effect::CursorMoved { from })
            }
            (SettingsEdit, _) => {
                let step = event.step();
                if step == 0 {
                    return None;
                }
                let target = self.edit_target()?;
                Some(Effect::Edit { target, step })
            }
        }
    }

    /// Move the "Go to page" cursor one entry, skipping `Main`
    pub fn step_menu_page(&mut self, step: i8, screen_count: usize) {
        let last = screen_count.saturating_sub(1).min(u8::MAX as usize) as u8;
        self.menu_cursor = wrap_step(self.menu_cursor, step, 1, last.max(1));
    }

    /// Flip the blink phase
    pub fn toggle_cursor(&mut self) {
        self.cursor_visible = !self.cursor_visible;
    }

    /// Character drawn in column 0 of the current settings line
    pub fn cursor_char(&self) -> u8 {
        match self.mode {
            UiMode::SettingsEdit if !self.cursor_visible => b' ',
            _ => b'>',
        }
    }

    fn stop_blink(&mut self) {
        self.blink_enabled = false;
        self.cursor_visible = true;
    }

    fn rotate_screen(&mut self, step: i8, screens: &[ScreenId]) -> Option<Effect> {
        if step == 0 || screens.is_empty() {
            return None;
        }
        let last = (screens.len() - 1).min(u8::MAX as usize) as u8;
        self.page_index = wrap_step(self.page_index.min(last), step, 0, last);
        self.active = screens[self.page_index as usize];
        Some(Effect::ScreenChanged)
    }

    fn select(&mut self, screens: &[ScreenId]) -> Option<Effect> {
        self.stop_blink();

        if self.active != ScreenId::Main {
            self.mode = UiMode::SettingsList;
            self.active = ScreenId::Main;
            self.current_line = 1;
            return Some(Effect::ScreenChanged);
        }

        match self.current_line {
            1 => {
                self.reset();
                Some(Effect::ModeChanged)
            }
            _ => {
                let target = *screens.get(self.menu_cursor as usize)?;
                self.mode = UiMode::SettingsList;
                self.active = target;
                self.current_line = 1;
                Some(Effect::ScreenChanged)
            }
        }
    }
}
