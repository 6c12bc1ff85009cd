//! Line renderer
//!
//! Formats each [`LineType`] into a 20-character row. Settings screens get
//! the cursor in column 0 of the selected line.

use multifuel_display::screen::{ARROW, DEGREE};
use multifuel_display::{Line, SCREEN_ROWS};
use multifuel_protocol::SourceStatus;

use super::format::{LineWriter, Pad, TENTHS_4, TENTHS_5, WHOLE_2, WHOLE_3, WHOLE_4};
use crate::catalog::{LineType, ScreenId, SettingField, SummaryField, UnitField, STARTUP_LINES};
use crate::config::DisplayPrefs;
use crate::nav::NavigationState;
use crate::state::{SettingsRecord, SourceState, SummaryStats};

/// Everything a screen can show
pub struct RenderContext<'a> {
    pub nav: &'a NavigationState,
    /// Telemetry of the active screen
    pub source: &'a SourceState,
    /// Limits of the active screen
    pub settings: &'a SettingsRecord,
    pub summary: SummaryStats,
    pub prefs: &'a DisplayPrefs,
    /// Browse list, used for page numbers and the menu page name
    pub screens: &'a [ScreenId],
    /// Primary controller answered the last ping
    pub link_up: bool,
}

impl RenderContext<'_> {
    fn screen(&self) -> ScreenId {
        self.nav.active
    }

    /// Two-digit page number: position in the browse list, `Main` excluded
    fn page_number(&self) -> u8 {
        self.screens
            .iter()
            .position(|screen| *screen == self.screen())
            .map_or(0, |index| index.saturating_sub(1) as u8)
    }

    fn menu_target(&self) -> Option<ScreenId> {
        self.screens.get(self.nav.menu_cursor as usize).copied()
    }
}

/// Status text, exactly 20 characters
pub fn status_text(status: SourceStatus) -> &'static [u8; 20] {
    match status {
        SourceStatus::NotFound => b"Status: not found   ",
        SourceStatus::Enabled => b"Status: enabled     ",
        SourceStatus::Disabled => b"Status: disabled    ",
        SourceStatus::DisabledOverVoltage => b"Status: disabled(OV)",
        SourceStatus::DisabledUnderVoltage => b"Status: disabled(UV)",
        SourceStatus::DisabledOverCurrent => b"Status: disabled(OC)",
        SourceStatus::DisabledOverTemperature => b"Status: disabled(OT)",
        SourceStatus::ResetRequired => b"Status: RST REQUIRED",
        SourceStatus::UnitOk => b"Status: Unit OK     ",
        SourceStatus::NoSources => b"Status: No Sources  ",
    }
}

/// Render all four rows of the active screen
pub fn render_screen(ctx: &RenderContext<'_>) -> [Line; SCREEN_ROWS] {
    core::array::from_fn(|row| render_row(row as u8, ctx))
}

/// Render one row of the active screen, cursor included
pub fn render_row(row: u8, ctx: &RenderContext<'_>) -> Line {
    let template = if ctx.nav.mode.is_settings() {
        ctx.screen().settings_template()
    } else {
        ctx.screen().template()
    };
    let mut line = render_line(template[row as usize], ctx);

    if ctx.nav.mode.is_settings() && row == ctx.nav.current_line {
        line[0] = ctx.nav.cursor_char();
    }
    if row == 0 && !ctx.link_up {
        line[19] = b'!';
    }
    line
}

/// Render one line type
pub fn render_line(line_type: LineType, ctx: &RenderContext<'_>) -> Line {
    let mut w = LineWriter::new();
    let source = ctx.source;

    match line_type {
        LineType::Title => title(&mut w, ctx),
        LineType::TitleWithPercentage => {
            title(&mut w, ctx);
            if source.has_charge_estimate {
                w.at(16)
                    .integer(source.percentage, 3, Pad::Space, (0.0, 999.0))
                    .push(b'%');
            }
        }
        LineType::Status => {
            w.push_bytes(status_text(source.status));
        }
        LineType::DcPair => dc_pair(&mut w, b"Input:   ", source),
        LineType::VarDcPair => dc_pair(&mut w, b"VARDC:   ", source),
        LineType::AcPower => {
            w.push_bytes(b"Inverter:      ")
                .integer(source.power, 4, Pad::Zero, WHOLE_4)
                .push(b'W');
        }
        LineType::PropertiesMain => {
            w.push(b' ')
                .decimal(source.voltage, 4, 1, TENTHS_4)
                .push_bytes(b"V/")
                .integer(source.current, 2, Pad::Zero, WHOLE_2)
                .push_bytes(b"A    ")
                .integer(source.power, 4, Pad::Zero, WHOLE_4)
                .push(b'W');
        }
        LineType::Properties => {
            w.push_bytes(b"Board Temp:  ");
            if source.has_temperature_sensor {
                w.decimal(source.temperature, 5, 1, TENTHS_5);
            } else {
                w.push_bytes(b"  N/A");
            }
            w.push(DEGREE).push(b'C');
        }
        LineType::Fixed(text) => {
            w.push_bytes(text);
        }
        LineType::Summary(field) => summary(&mut w, field, &ctx.summary),
        LineType::Setting(field) => setting(&mut w, field, ctx.settings),
        LineType::MenuPage => {
            w.push_bytes(b" Go to page       ").integer(
                ctx.nav.menu_cursor.saturating_sub(1) as f32,
                2,
                Pad::Space,
                WHOLE_2,
            );
        }
        LineType::MenuName => {
            w.push(b' ').push(ARROW);
            if let Some(target) = ctx.menu_target() {
                w.push_bytes(target.menu_name());
            }
        }
        LineType::Unit(field) => unit(&mut w, field, ctx.prefs),
    }

    w.finish()
}

/// Rows shown while waiting for the primary controller
pub fn render_startup() -> [Line; SCREEN_ROWS] {
    core::array::from_fn(|row| {
        let mut w = LineWriter::new();
        w.push_bytes(STARTUP_LINES[row]);
        w.finish()
    })
}

fn title(w: &mut LineWriter, ctx: &RenderContext<'_>) {
    use core::fmt::Write;
    let _ = write!(w, "{:02}) ", ctx.page_number());
    w.push_bytes(ctx.screen().title());
}

fn dc_pair(w: &mut LineWriter, label: &[u8], source: &SourceState) {
    w.push_bytes(label)
        .decimal(source.voltage, 4, 1, TENTHS_4)
        .push_bytes(b"V/")
        .decimal(source.current, 4, 1, TENTHS_4)
        .push(b'A');
}

fn summary(w: &mut LineWriter, field: SummaryField, stats: &SummaryStats) {
    match field {
        SummaryField::ActiveInputs => {
            w.push_bytes(b"Active Inputs:    ").integer(
                stats.active_inputs as f32,
                2,
                Pad::Space,
                WHOLE_2,
            );
        }
        SummaryField::MaxTemperature => {
            w.push_bytes(b"Temp    (Max): ")
                .integer(stats.max_temperature, 3, Pad::Space, WHOLE_3)
                .push(DEGREE)
                .push(b'C');
        }
        SummaryField::MaxCurrent => {
            w.push_bytes(b"Current (Max):   ")
                .integer(stats.max_current, 2, Pad::Space, WHOLE_2)
                .push(b'A');
        }
    }
}

fn setting(w: &mut LineWriter, field: SettingField, record: &SettingsRecord) {
    w.push(b' ')
        .push_bytes(field.label())
        .at(15)
        .decimal(record.get(field) as f32, 4, 1, TENTHS_4)
        .push(field.unit());
}

fn unit(w: &mut LineWriter, field: UnitField, prefs: &DisplayPrefs) {
    match field {
        UnitField::Backlight => {
            let state: &[u8] = if prefs.backlight_on { b" ON" } else { b"OFF" };
            w.push_bytes(b" Backlight").at(17).push_bytes(state);
        }
        UnitField::Color => {
            w.push_bytes(b" LCD Color")
                .at(14)
                .push_bytes(prefs.palette_entry().label);
        }
        UnitField::Contrast => {
            w.push_bytes(b" Contrast")
                .at(17)
                .integer(prefs.contrast as f32, 3, Pad::Zero, WHOLE_3);
        }
    }
}
