//! UI controller
//!
//! Owns every store and collaborator and advances them one cooperative
//! step at a time:
//!
//! 1. `handle_input` runs a navigation transition, then its bus side
//!    effects, then repaints the touched rows in place
//! 2. `poll` runs the presence timer, one repaint step and one blink step
//!
//! Edit handlers never repaint whole screens themselves; they only set
//! the scheduler's force flag, which `poll` picks up.

use multifuel_display::{DisplayBackend, NavigationEvent, Screen, SCREEN_ROWS};
use multifuel_hal::{BacklightDriver, Clock, ConfigStore, I2cBus};

use crate::catalog::ScreenId;
use crate::client::ProtocolClient;
use crate::config::{ConfigError, DisplayPrefs, UiConfig, PALETTE};
use crate::nav::{clamp_step, wrap_step, EditTarget, Effect, NavigationState, UiMode, UnitFlag};
use crate::render::{render_row, render_startup, RenderContext};
use crate::scheduler::{Interval, RefreshScheduler, RepaintStep};
use crate::state::{SettingsStore, SourceStore};

/// Display controller main state
pub struct Controller<B, D, S, L>
where
    B: I2cBus,
    D: DisplayBackend,
    S: ConfigStore,
    L: BacklightDriver,
{
    client: ProtocolClient<B>,
    display: D,
    store: S,
    backlight: L,
    config: UiConfig,
    nav: NavigationState,
    sources: SourceStore,
    settings: SettingsStore,
    prefs: DisplayPrefs,
    /// What the display should show
    frame: Screen,
    refresh: RefreshScheduler,
    presence: Interval,
    /// Link state the frame was last rendered with
    link_shown: bool,
    /// Rows whose last `GET_SCREEN` came back short or failed, one bit per row
    stale_rows: u8,
}

impl<B, D, S, L> Controller<B, D, S, L>
where
    B: I2cBus,
    D: DisplayBackend,
    S: ConfigStore,
    L: BacklightDriver,
{
    /// Create a controller; nothing touches the hardware until `startup`
    pub fn new(bus: B, display: D, store: S, backlight: L, config: UiConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            client: ProtocolClient::new(bus, config.primary_address),
            display,
            store,
            backlight,
            refresh: RefreshScheduler::new(config.update_interval_ms, config.blink_interval_ms),
            presence: Interval::new(config.presence_interval_ms),
            config,
            nav: NavigationState::new(),
            sources: SourceStore::new(),
            settings: SettingsStore::new(),
            prefs: DisplayPrefs::default(),
            frame: Screen::new(),
            link_shown: false,
            stale_rows: 0,
        })
    }

    /// Bring the UI up
    ///
    /// Restores the stored display preferences, shows the start screen and
    /// waits for the primary controller. Returns whether it answered; the
    /// UI starts browsing `Main` either way.
    pub fn startup<C: Clock>(&mut self, clock: &mut C) -> bool {
        self.prefs = DisplayPrefs::load(&mut self.store);
        self.apply_backlight();

        self.frame.clear();
        for (row, line) in render_startup().iter().enumerate() {
            self.frame.set_line(row, line);
        }
        if self.display.clear().is_ok() {
            self.flush();
        }

        let present = self.client.await_primary_controller(
            self.config.startup_attempts,
            self.config.startup_interval_ms,
            clock,
        );
        if present {
            self.client.take_reconnected();
            self.resync();
        } else {
            self.nav.reset();
            self.refresh.request_force();
        }

        self.presence.reset(clock.now_ms());
        present
    }

    /// Pull the full UI configuration and every displayed source's limits,
    /// then return to browsing `Main`
    pub fn resync(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("Resynchronising with primary controller");

        if let Some(config) = self.client.get_config() {
            self.prefs.apply_payload(&config);
            self.prefs.save(&mut self.store);
            self.apply_backlight();
        }

        for screen in self.config.source_screens() {
            if let Some(record) = self.client.get_settings(screen) {
                self.settings.replace(record);
            }
        }

        self.nav.reset();
        self.refresh.request_force();
        self.send_input_data();
    }

    /// Process one front-panel event
    pub fn handle_input(&mut self, event: NavigationEvent) {
        let mode_before = self.nav.mode;
        let Some(effect) = self.nav.handle(event, &self.config.screens) else {
            return;
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("{} -> {}", event, effect);

        match effect {
            Effect::ScreenChanged => {
                let active = self.nav.active;
                if self.nav.mode.is_settings() && active.is_source() {
                    self.pull_settings(active);
                }
                self.refresh.request_force();
            }
            Effect::ModeChanged => self.refresh.request_force(),
            Effect::CursorMoved { from } => {
                self.refresh_line(from);
                self.refresh_line(self.nav.current_line);
            }
            Effect::BeginEdit(target) => {
                if let EditTarget::Numeric(screen, _) = target {
                    self.pull_settings(screen);
                }
                self.refresh_settings_lines();
            }
            Effect::Edit { target, step } => self.apply_edit(target, step),
            Effect::EndEdit => self.refresh_line(self.nav.current_line),
        }

        if self.nav.mode != mode_before {
            #[cfg(feature = "defmt")]
            defmt::info!("UI mode {}", self.nav.mode);
            self.send_input_data();
        }
    }

    /// One step of background work
    pub fn poll(&mut self, now_ms: u32) {
        if self.presence.fire(now_ms) {
            self.client.presence_check();
        }
        if self.client.take_reconnected() {
            self.resync();
        }
        if self.link_shown != self.client.is_present() {
            self.refresh_line(0);
        }

        match self.refresh.poll_repaint(now_ms) {
            Some(RepaintStep::Begin { clear }) => self.begin_repaint(clear),
            Some(RepaintStep::Row(row)) => self.repaint_row(row),
            None => {}
        }

        if self.refresh.poll_blink(now_ms, self.nav.blink_enabled) {
            self.nav.toggle_cursor();
            self.refresh_line(self.nav.current_line);
        }
    }

    /// Apply one encoder step to an edit target
    pub fn apply_edit(&mut self, target: EditTarget, step: i8) {
        match target {
            EditTarget::Numeric(screen, field) => {
                let record = self.settings.get_mut(screen);
                record.set(field, clamp_step(record.get(field), step, self.config.setting_max));
                let record = *record;
                self.client.send_settings(&record);
            }
            EditTarget::Boolean(UnitFlag::Backlight) => {
                if step != 0 {
                    self.prefs.backlight_on = !self.prefs.backlight_on;
                    self.prefs_changed();
                }
            }
            EditTarget::BacklightColor => {
                let last = (PALETTE.len() - 1) as u8;
                self.prefs.backlight_color = wrap_step(self.prefs.backlight_color, step, 0, last);
                self.prefs_changed();
            }
            EditTarget::Contrast => {
                self.prefs.contrast = clamp_step(self.prefs.contrast, step, u8::MAX);
                self.prefs_changed();
            }
            EditTarget::MenuPage => {
                self.nav.step_menu_page(step, self.config.screens.len());
                // Menu name follows the page
                self.refresh_line(3);
            }
        }

        self.refresh_line(self.nav.current_line);
    }

    /// Re-render one row from local state and write it if it changed
    pub fn refresh_line(&mut self, row: u8) {
        if row as usize >= SCREEN_ROWS {
            return;
        }
        let line = render_row(row, &self.context());
        self.frame.set_line(row as usize, &line);
        self.flush_row(row);
    }

    pub fn nav(&self) -> &NavigationState {
        &self.nav
    }

    pub fn mode(&self) -> UiMode {
        self.nav.mode
    }

    pub fn prefs(&self) -> &DisplayPrefs {
        &self.prefs
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn sources(&self) -> &SourceStore {
        &self.sources
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Rows the last repaint could not read in full, bit `n` for row `n`
    pub fn stale_rows(&self) -> u8 {
        self.stale_rows
    }

    pub fn frame(&self) -> &Screen {
        &self.frame
    }

    pub fn client(&self) -> &ProtocolClient<B> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut ProtocolClient<B> {
        &mut self.client
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn backlight(&self) -> &L {
        &self.backlight
    }

    fn context(&self) -> RenderContext<'_> {
        let active = self.nav.active;
        RenderContext {
            nav: &self.nav,
            source: self.sources.get(active),
            settings: self.settings.get(active),
            summary: self.sources.summary(),
            prefs: &self.prefs,
            screens: &self.config.screens,
            link_up: self.client.is_present(),
        }
    }

    /// Start of a repaint cycle: refresh telemetry, then rebuild the frame
    /// from the local template
    fn begin_repaint(&mut self, clear: bool) {
        if clear {
            self.frame.clear();
            if let Err(_e) = self.display.clear() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Display clear failed: {}", _e);
            }
        }

        let active = self.nav.active;
        if self.browsing_live() && active != ScreenId::Summary {
            if let Some(payload) = self.client.get_source(active) {
                self.sources.update(active, &payload);
            }
        }

        let context = self.context();
        let link_up = context.link_up;
        let lines: [_; SCREEN_ROWS] = core::array::from_fn(|row| render_row(row as u8, &context));
        self.link_shown = link_up;
        for (row, line) in lines.iter().enumerate() {
            self.frame.set_line(row, line);
        }
    }

    /// Overlay the primary controller's copy of a row, then write it
    ///
    /// A short read still overlays what arrived; the row is marked stale
    /// until a later cycle reads it in full.
    fn repaint_row(&mut self, row: u8) {
        let mask = 1 << row;
        if self.browsing_live() {
            if self.client.get_screen_row(self.nav.active, row, &mut self.frame) {
                self.stale_rows &= !mask;
            } else {
                #[cfg(feature = "defmt")]
                defmt::debug!("Row {} of {} is stale", row, self.nav.active);
                self.stale_rows |= mask;
            }
        } else {
            self.stale_rows &= !mask;
        }
        self.flush_row(row);
    }

    /// Browsing with the primary controller reachable
    fn browsing_live(&self) -> bool {
        self.nav.mode == UiMode::Browse && self.client.is_present()
    }

    fn pull_settings(&mut self, screen: ScreenId) {
        if let Some(record) = self.client.get_settings(screen) {
            self.settings.replace(record);
        }
    }

    fn refresh_settings_lines(&mut self) {
        for row in 1..SCREEN_ROWS as u8 {
            self.refresh_line(row);
        }
    }

    /// Persist, drive and announce changed display preferences
    fn prefs_changed(&mut self) {
        self.prefs.save(&mut self.store);
        self.apply_backlight();
        self.send_input_data();
    }

    fn apply_backlight(&mut self) {
        self.backlight.set_rgb(self.prefs.backlight_rgb());
        self.backlight.set_contrast(self.prefs.contrast);
    }

    fn send_input_data(&mut self) {
        let payload = self.prefs.to_payload(self.nav.mode.to_byte());
        self.client.send_input_data(payload);
    }

    fn flush_row(&mut self, row: u8) {
        if row == 0 {
            self.link_shown = self.client.is_present();
        }
        if let Err(_e) = self.frame.flush_row(row as usize, &mut self.display) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display write failed on row {}: {}", row, _e);
        }
    }

    fn flush(&mut self) {
        for row in 0..SCREEN_ROWS as u8 {
            self.flush_row(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SettingField;
    use crate::testing::{FakePrimary, ManualClock, MemoryStore, RecordingBacklight, RecordingDisplay};
    use multifuel_hal::{Rgb, StorageKey};
    use multifuel_protocol::{Request, SettingsPayload, UiPayload};

    type TestController = Controller<FakePrimary, RecordingDisplay, MemoryStore, RecordingBacklight>;

    fn controller(primary: FakePrimary) -> TestController {
        Controller::new(
            primary,
            RecordingDisplay::new(),
            MemoryStore::new(),
            RecordingBacklight::default(),
            UiConfig::default(),
        )
        .unwrap()
    }

    fn started(primary: FakePrimary) -> (TestController, ManualClock) {
        let mut clock = ManualClock::new();
        let mut controller = controller(primary);
        assert!(controller.startup(&mut clock));
        (controller, clock)
    }

    /// Poll until the running repaint cycle completes
    fn settle(controller: &mut TestController, clock: &mut ManualClock) {
        for _ in 0..=SCREEN_ROWS {
            controller.poll(clock.now_ms());
        }
    }

    fn open_settings_for(controller: &mut TestController, screen: ScreenId) {
        controller.handle_input(NavigationEvent::Menu);
        let page = controller
            .config()
            .screens
            .iter()
            .position(|s| *s == screen)
            .unwrap();
        // Line 2 is the page picker
        controller.handle_input(NavigationEvent::Right);
        controller.handle_input(NavigationEvent::Menu);
        for _ in 1..page {
            controller.handle_input(NavigationEvent::Rotate(1));
        }
        controller.handle_input(NavigationEvent::Menu);
        controller.handle_input(NavigationEvent::Select);
        assert_eq!(controller.nav().active, screen);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = UiConfig {
            blink_interval_ms: 500,
            ..UiConfig::default()
        };
        let result = Controller::new(
            FakePrimary::new(),
            RecordingDisplay::new(),
            MemoryStore::new(),
            RecordingBacklight::default(),
            config,
        );
        assert!(matches!(result, Err(ConfigError::BlinkNotShorter)));
    }

    #[test]
    fn test_startup_pulls_config_and_settings() {
        let mut primary = FakePrimary::new();
        primary.config = UiPayload {
            contrast: 30,
            ui_mode: 0,
            backlight_on: 1,
            backlight_color: 1,
        };
        primary.settings[ScreenId::Lipo.index()] = SettingsPayload {
            screen_id: ScreenId::Lipo.as_u8(),
            min_voltage: 18,
            max_voltage: 25,
            max_current: 20,
        };
        let (controller, _) = started(primary);

        assert_eq!(controller.prefs().contrast, 30);
        assert_eq!(controller.backlight().rgb, Rgb::new(0xFF, 0, 0));
        assert_eq!(controller.store().cell(StorageKey::Contrast), 30);
        assert_eq!(controller.settings().get(ScreenId::Lipo).min_voltage, 18);
        assert_eq!(controller.nav().active, ScreenId::Main);
        assert_eq!(controller.mode(), UiMode::Browse);
    }

    #[test]
    fn test_startup_without_primary() {
        let mut clock = ManualClock::new();
        let mut controller = controller(FakePrimary::absent());

        assert!(!controller.startup(&mut clock));
        assert_eq!(controller.display().line(1), b"Setting up unit     ");
        // Ten pings, nine waits
        assert_eq!(clock.now_ms(), 1800);

        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(0), b" Multifuel Unit    !");
        assert_eq!(controller.prefs().contrast, 5);
    }

    #[test]
    fn test_browse_wraps_and_repaints() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        let count = controller.config().screens.len();

        controller.handle_input(NavigationEvent::Left);
        assert_eq!(controller.nav().page_index as usize, count - 1);
        controller.handle_input(NavigationEvent::Right);
        assert_eq!(controller.nav().page_index, 0);
        controller.handle_input(NavigationEvent::Right);
        assert_eq!(controller.nav().active, ScreenId::Summary);

        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(0), b"00) Unit Summary    ");
    }

    #[test]
    fn test_repaint_overlays_primary_rows() {
        let mut primary = FakePrimary::new();
        let mut row = [0u8; 20];
        row[..7].copy_from_slice(b"Custom!");
        primary.rows[ScreenId::Main.index()][2] = row;
        let (mut controller, mut clock) = started(primary);

        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(2), b"Custom!C   Inverter ");
    }

    #[test]
    fn test_repaint_fetches_telemetry() {
        let mut primary = FakePrimary::new();
        let source = &mut primary.sources[ScreenId::Main.index()];
        source.centivolts = 1230;
        source.centiamps = 500;
        source.watts = 450;
        let (mut controller, mut clock) = started(primary);

        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(3), b" 12.3V/05A    0450W ");
    }

    #[test]
    fn test_partial_row_keeps_local_content() {
        let mut primary = FakePrimary::new();
        primary.rows[ScreenId::Main.index()][1] = *b"XXXXXXXXXXXXXXXXXXXX";
        let (mut controller, mut clock) = started(primary);
        primary_mut(&mut controller).truncate_to = Some(3);

        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(1), b"XXXtus: No Sources  ");
        assert_eq!(controller.stale_rows(), 0b1111);

        primary_mut(&mut controller).truncate_to = None;
        clock.advance(250);
        settle(&mut controller, &mut clock);
        assert_eq!(controller.stale_rows(), 0);
        assert_eq!(controller.display().line(1), b"XXXXXXXXXXXXXXXXXXXX");
    }

    fn primary_mut(controller: &mut TestController) -> &mut FakePrimary {
        controller.client_mut().bus_mut()
    }

    #[test]
    fn test_encoder_edit_moves_one_unit() {
        let (mut controller, _) = started(FakePrimary::new());
        open_settings_for(&mut controller, ScreenId::LeadAcid);

        // Min voltage is under the cursor
        controller.handle_input(NavigationEvent::Menu);
        assert_eq!(controller.mode(), UiMode::SettingsEdit);
        controller.handle_input(NavigationEvent::Rotate(7));

        let record = *controller.settings().get(ScreenId::LeadAcid);
        assert_eq!(record.get(SettingField::MinVoltage), 1);
        assert_eq!(
            primary_mut(&mut controller).requests().last(),
            Some(&Request::SendSettings(record.to_payload()))
        );
        assert_eq!(controller.display().line(1), b">Min Voltage   01.0V");
    }

    #[test]
    fn test_numeric_edit_clamps() {
        let (mut controller, _) = started(FakePrimary::new());
        open_settings_for(&mut controller, ScreenId::Generator);
        controller.handle_input(NavigationEvent::Right);
        controller.handle_input(NavigationEvent::Menu);

        // Max voltage starts at 55
        for _ in 0..10 {
            controller.handle_input(NavigationEvent::Rotate(1));
        }
        assert_eq!(
            controller.settings().get(ScreenId::Generator).max_voltage,
            58
        );

        for _ in 0..70 {
            controller.handle_input(NavigationEvent::Rotate(-3));
        }
        assert_eq!(controller.settings().get(ScreenId::Generator).max_voltage, 0);
    }

    #[test]
    fn test_edit_entry_pulls_settings() {
        let (mut controller, _) = started(FakePrimary::new());
        open_settings_for(&mut controller, ScreenId::Solar);

        primary_mut(&mut controller).settings[ScreenId::Solar.index()].min_voltage = 9;
        controller.handle_input(NavigationEvent::Menu);
        assert_eq!(controller.settings().get(ScreenId::Solar).min_voltage, 9);
    }

    #[test]
    fn test_mode_changes_send_input_data() {
        let (mut controller, _) = started(FakePrimary::new());
        primary_mut(&mut controller).clear_frames();

        controller.handle_input(NavigationEvent::Menu);
        assert_eq!(
            primary_mut(&mut controller).requests().last(),
            Some(&Request::SendInputData(UiPayload {
                contrast: 5,
                ui_mode: 1,
                backlight_on: 1,
                backlight_color: 0,
            }))
        );

        // Back to browse from "Go back to main"
        controller.handle_input(NavigationEvent::Select);
        assert_eq!(controller.mode(), UiMode::Browse);
        assert_eq!(primary_mut(&mut controller).config.ui_mode, 0);
    }

    #[test]
    fn test_module_settings_edit() {
        let (mut controller, _) = started(FakePrimary::new());
        open_settings_for(&mut controller, ScreenId::Summary);

        // Colour
        controller.handle_input(NavigationEvent::Right);
        controller.handle_input(NavigationEvent::Menu);
        controller.handle_input(NavigationEvent::Rotate(-1));
        assert_eq!(controller.prefs().backlight_color, 7);
        assert_eq!(controller.backlight().rgb, Rgb::new(0xFF, 0x8C, 0x00));
        assert_eq!(controller.store().cell(StorageKey::BacklightColor), 7);
        assert_eq!(primary_mut(&mut controller).config.backlight_color, 7);
        controller.handle_input(NavigationEvent::Menu);

        // Backlight toggle
        controller.handle_input(NavigationEvent::Left);
        controller.handle_input(NavigationEvent::Menu);
        controller.handle_input(NavigationEvent::Rotate(2));
        assert!(!controller.prefs().backlight_on);
        assert_eq!(controller.backlight().rgb, Rgb::OFF);
        assert_eq!(controller.display().line(1), b">Backlight       OFF");
    }

    #[test]
    fn test_presence_flip_resyncs() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        controller.handle_input(NavigationEvent::Menu);
        assert!(controller.mode().is_settings());

        primary_mut(&mut controller).set_present(false);
        clock.advance(1000);
        controller.poll(clock.now_ms());
        assert!(!controller.client().is_present());

        primary_mut(&mut controller).set_present(true);
        primary_mut(&mut controller).config.contrast = 77;
        primary_mut(&mut controller).clear_frames();
        clock.advance(1000);
        controller.poll(clock.now_ms());

        assert_eq!(
            primary_mut(&mut controller).requests().first(),
            Some(&Request::GetConfig)
        );
        assert_eq!(controller.prefs().contrast, 77);
        assert_eq!(controller.nav().active, ScreenId::Main);
        assert_eq!(controller.mode(), UiMode::Browse);
    }

    #[test]
    fn test_source_settings_page_entry_pulls_settings() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        primary_mut(&mut controller).settings[ScreenId::Charger.index()].max_current = 12;
        primary_mut(&mut controller).clear_frames();

        open_settings_for(&mut controller, ScreenId::Charger);

        assert!(primary_mut(&mut controller)
            .requests()
            .contains(&Request::GetSettings {
                screen_id: ScreenId::Charger.as_u8()
            }));
        assert_eq!(controller.settings().get(ScreenId::Charger).max_current, 12);
        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(3), b" Max Current   12.0A");
    }

    #[test]
    fn test_module_settings_entry_has_no_settings_read() {
        let (mut controller, _) = started(FakePrimary::new());
        primary_mut(&mut controller).clear_frames();

        open_settings_for(&mut controller, ScreenId::Summary);

        assert!(!primary_mut(&mut controller)
            .requests()
            .iter()
            .any(|request| matches!(request, Request::GetSettings { .. })));
    }

    #[test]
    fn test_resync_announces_browse_mode() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        controller.handle_input(NavigationEvent::Menu);
        assert_eq!(primary_mut(&mut controller).config.ui_mode, 1);

        primary_mut(&mut controller).set_present(false);
        clock.advance(1000);
        controller.poll(clock.now_ms());
        primary_mut(&mut controller).set_present(true);
        clock.advance(1000);
        controller.poll(clock.now_ms());

        assert!(controller.client().is_present());
        assert_eq!(primary_mut(&mut controller).config.ui_mode, 0);
    }

    #[test]
    fn test_cursor_blinks_while_editing() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        open_settings_for(&mut controller, ScreenId::DcDc);
        controller.handle_input(NavigationEvent::Menu);
        settle(&mut controller, &mut clock);
        assert_eq!(controller.display().line(1)[0], b'>');

        clock.advance(100);
        controller.poll(clock.now_ms());
        assert_eq!(controller.display().line(1)[0], b' ');

        // Leaving edit mode shows a steady cursor
        controller.handle_input(NavigationEvent::Menu);
        assert_eq!(controller.display().line(1)[0], b'>');
    }

    #[test]
    fn test_settings_repaint_has_no_bus_reads() {
        let (mut controller, mut clock) = started(FakePrimary::new());
        controller.handle_input(NavigationEvent::Menu);
        primary_mut(&mut controller).clear_frames();

        settle(&mut controller, &mut clock);
        clock.advance(250);
        settle(&mut controller, &mut clock);
        assert!(primary_mut(&mut controller).frames().is_empty());
        assert_eq!(controller.display().line(0), b"   Settings Menu    ");
    }
}
