//! Protocol client for the primary controller
//!
//! Every request is one 5-byte frame; reads use a write-then-read
//! transaction with a fixed response length. The client never returns a
//! bus error: failures and short responses are recorded in
//! [`LastCommand`] and surface as `None` / `false`, leaving the caller's
//! state untouched.
//!
//! While the primary controller is absent, each command first pings
//! the address. If it still does not answer, the command is recorded as
//! [`Outcome::Skipped`] and no transaction takes place.

use multifuel_display::Screen;
use multifuel_hal::{Clock, I2cBus};
use multifuel_protocol::messages::decode_payload;
use multifuel_protocol::{
    CommandFrame, Request, SourcePayload, UiPayload, PAYLOAD_LEN, ROW_LEN,
};

use crate::catalog::ScreenId;
use crate::config::palette_index;
use crate::state::SettingsRecord;

/// Largest fixed response
const MAX_RESPONSE: usize = ROW_LEN;

/// Result of the last command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Frame written and, for reads, the full response received
    Ok,
    /// Only this many response bytes arrived
    Partial(u8),
    /// The bus reported an error
    BusError,
    /// Primary controller absent; nothing was sent
    Skipped,
}

/// Diagnostic record of the most recent command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LastCommand {
    pub frame: CommandFrame,
    /// A bus transaction was attempted
    pub transacted: bool,
    pub outcome: Outcome,
}

/// Request/response client bound to one bus address
pub struct ProtocolClient<B: I2cBus> {
    bus: B,
    address: u8,
    present: bool,
    /// Set on an absent-to-present flip, cleared by `take_reconnected`
    reconnected: bool,
    last_command: Option<LastCommand>,
}

impl<B: I2cBus> ProtocolClient<B> {
    /// Create a client; the primary controller counts as absent until pinged
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            present: false,
            reconnected: false,
            last_command: None,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Check if the primary controller answered the last ping
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn last_command(&self) -> Option<&LastCommand> {
        self.last_command.as_ref()
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consume a pending absent-to-present flip
    pub fn take_reconnected(&mut self) -> bool {
        core::mem::take(&mut self.reconnected)
    }

    /// Ping the address with a zero-length write
    pub fn presence_check(&mut self) -> bool {
        let present = self.bus.ping(self.address);

        if present != self.present {
            #[cfg(feature = "defmt")]
            if present {
                defmt::info!("Primary controller present at {:#04x}", self.address);
            } else {
                defmt::warn!("Primary controller lost");
            }
            self.reconnected = present;
        }

        self.present = present;
        present
    }

    /// Ping until the primary controller answers or attempts run out
    pub fn await_primary_controller<C: Clock>(
        &mut self,
        max_attempts: u8,
        interval_ms: u32,
        clock: &mut C,
    ) -> bool {
        for attempt in 0..max_attempts {
            if self.presence_check() {
                return true;
            }
            if attempt + 1 < max_attempts {
                clock.delay_ms(interval_ms);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("No primary controller after {} attempts", max_attempts);

        false
    }

    /// `GET_CONFIG`; an out-of-palette colour falls back to the first entry
    pub fn get_config(&mut self) -> Option<UiPayload> {
        let mut response = [0u8; PAYLOAD_LEN];
        self.read(&Request::GetConfig, &mut response)?;

        let mut config: UiPayload = decode_payload(&response).ok()?;
        config.backlight_color = palette_index(config.backlight_color);
        Some(config)
    }

    /// `GET_SETTINGS`; a response for another screen counts as garbled
    pub fn get_settings(&mut self, screen: ScreenId) -> Option<SettingsRecord> {
        let mut response = [0u8; PAYLOAD_LEN];
        self.read(
            &Request::GetSettings {
                screen_id: screen.as_u8(),
            },
            &mut response,
        )?;

        let record = SettingsRecord::from_payload(&decode_payload(&response).ok()?)?;
        if record.screen != screen {
            #[cfg(feature = "defmt")]
            defmt::warn!("Settings for {} answered with {}", screen, record.screen);
            return None;
        }
        Some(record)
    }

    /// `GET_SOURCE`; a response for another screen counts as garbled
    pub fn get_source(&mut self, screen: ScreenId) -> Option<SourcePayload> {
        let mut response = [0u8; SourcePayload::LEN];
        self.read(
            &Request::GetSource {
                screen_id: screen.as_u8(),
            },
            &mut response,
        )?;

        let payload = SourcePayload::decode(&response).ok()?;
        if payload.screen_id != screen.as_u8() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Telemetry for {} answered with id {}", screen, payload.screen_id);
            return None;
        }
        Some(payload)
    }

    /// `GET_SCREEN` for one row, overlaid onto `frame`
    ///
    /// Only non-zero bytes overwrite the row, and a short response overlays
    /// what did arrive. Returns true when the full row was received.
    pub fn get_screen_row(&mut self, screen: ScreenId, row: u8, frame: &mut Screen) -> bool {
        let request = Request::GetScreen {
            screen_id: screen.as_u8(),
            row,
        };
        let mut response = [0u8; ROW_LEN];

        match self.transact(&request, &mut response) {
            Outcome::Ok => {
                frame.overlay(row as usize, &response);
                true
            }
            Outcome::Partial(received) => {
                frame.overlay(row as usize, &response[..received as usize]);
                false
            }
            Outcome::BusError | Outcome::Skipped => false,
        }
    }

    /// `GET_SCREEN` for all four rows; returns how many were fresh
    pub fn get_screen(&mut self, screen: ScreenId, frame: &mut Screen) -> u8 {
        let mut fresh = 0;
        for row in 0..multifuel_display::SCREEN_ROWS as u8 {
            if self.get_screen_row(screen, row, frame) {
                fresh += 1;
            }
        }
        fresh
    }

    /// `SEND_INPUT_DATA`, fire and forget
    pub fn send_input_data(&mut self, payload: UiPayload) {
        let _ = self.transact(&Request::SendInputData(payload), &mut []);
    }

    /// `SEND_SETTINGS`, fire and forget
    pub fn send_settings(&mut self, record: &SettingsRecord) {
        let _ = self.transact(&Request::SendSettings(record.to_payload()), &mut []);
    }

    /// Run a read; `Some` only when the whole response arrived
    fn read(&mut self, request: &Request, response: &mut [u8]) -> Option<()> {
        match self.transact(request, response) {
            Outcome::Ok => Some(()),
            _ => None,
        }
    }

    fn transact(&mut self, request: &Request, response: &mut [u8]) -> Outcome {
        let frame = match request.to_frame() {
            Ok(frame) => frame,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Unencodable request: {}", _e);
                return Outcome::BusError;
            }
        };

        if !self.present && !self.presence_check() {
            self.record(frame, false, Outcome::Skipped);
            return Outcome::Skipped;
        }

        let expected = frame.command.response_len().min(MAX_RESPONSE);
        let bytes = frame.to_bytes();

        let outcome = if expected == 0 {
            match self.bus.write(self.address, &bytes) {
                Ok(()) => Outcome::Ok,
                Err(_) => Outcome::BusError,
            }
        } else {
            match self.bus.write_read(self.address, &bytes, &mut response[..expected]) {
                Ok(received) if received >= expected => Outcome::Ok,
                Ok(received) => Outcome::Partial(received as u8),
                Err(_) => Outcome::BusError,
            }
        };

        #[cfg(feature = "defmt")]
        if outcome != Outcome::Ok {
            defmt::warn!("{} to {:#04x}: {}", frame.command, self.address, outcome);
        }

        self.record(frame, true, outcome);
        outcome
    }

    fn record(&mut self, frame: CommandFrame, transacted: bool, outcome: Outcome) {
        self.last_command = Some(LastCommand {
            frame,
            transacted,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePrimary, ManualClock, PRIMARY_ADDRESS};
    use multifuel_display::BLANK_LINE;
    use multifuel_protocol::{Command, SettingsPayload};

    fn client(primary: FakePrimary) -> ProtocolClient<FakePrimary> {
        ProtocolClient::new(primary, PRIMARY_ADDRESS)
    }

    fn present_client() -> ProtocolClient<FakePrimary> {
        let mut client = client(FakePrimary::new());
        assert!(client.presence_check());
        client
    }

    #[test]
    fn test_presence_flip_reports_reconnect() {
        let mut client = client(FakePrimary::absent());
        assert!(!client.presence_check());
        assert!(!client.take_reconnected());

        client.bus_mut().set_present(true);
        assert!(client.presence_check());
        assert!(client.take_reconnected());
        assert!(!client.take_reconnected());

        // Staying present is not a flip
        assert!(client.presence_check());
        assert!(!client.take_reconnected());
    }

    #[test]
    fn test_await_primary_controller() {
        let mut clock = ManualClock::new();
        let mut client = client(FakePrimary::present_after_pings(3));

        assert!(client.await_primary_controller(10, 200, &mut clock));
        assert_eq!(clock.now_ms(), 400);
    }

    #[test]
    fn test_await_gives_up() {
        let mut clock = ManualClock::new();
        let mut client = client(FakePrimary::absent());

        assert!(!client.await_primary_controller(4, 200, &mut clock));
        assert_eq!(client.bus().pings(), 4);
        // No delay after the last attempt
        assert_eq!(clock.now_ms(), 600);
    }

    #[test]
    fn test_get_config_palette_fallback() {
        let mut primary = FakePrimary::new();
        primary.config = UiPayload {
            contrast: 40,
            ui_mode: 0,
            backlight_on: 1,
            backlight_color: 12,
        };
        let mut client = client(primary);

        let config = client.get_config().unwrap();
        assert_eq!(config.contrast, 40);
        assert_eq!(config.backlight_color, 0);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut client = present_client();
        let record = SettingsRecord {
            screen: ScreenId::Solar,
            min_voltage: 11,
            max_voltage: 29,
            max_current: 40,
        };

        client.send_settings(&record);
        assert_eq!(client.get_settings(ScreenId::Solar), Some(record));
    }

    #[test]
    fn test_settings_for_wrong_screen_is_absent() {
        let mut primary = FakePrimary::new();
        primary.settings[ScreenId::Lipo.index()] = SettingsPayload {
            screen_id: ScreenId::Generator.as_u8(),
            min_voltage: 1,
            max_voltage: 2,
            max_current: 3,
        };
        let mut client = client(primary);
        assert_eq!(client.get_settings(ScreenId::Lipo), None);
    }

    #[test]
    fn test_get_source() {
        let mut primary = FakePrimary::new();
        primary.sources[ScreenId::AcDc.index()].centivolts = 1234;
        let mut client = client(primary);

        let payload = client.get_source(ScreenId::AcDc).unwrap();
        assert_eq!(payload.centivolts, 1234);
        assert_eq!(
            client.last_command().map(|c| c.frame.command),
            Some(Command::GetSource)
        );
    }

    #[test]
    fn test_read_while_absent_is_skipped() {
        let mut client = client(FakePrimary::absent());
        let mut frame = Screen::new();
        frame.set_line(2, b"Input:   12.3V/04.5A");
        let before = *frame.lines();

        assert_eq!(client.get_screen(ScreenId::DcDc, &mut frame), 0);
        assert_eq!(frame.lines(), &before);

        let last = client.last_command().unwrap();
        assert!(!last.transacted);
        assert_eq!(last.outcome, Outcome::Skipped);
        assert_eq!(last.frame.command, Command::GetScreen);
        assert_eq!(last.frame.payload, [ScreenId::DcDc.as_u8(), 3, 0, 0]);
        assert!(client.bus().frames().is_empty());
    }

    #[test]
    fn test_write_while_absent_is_skipped() {
        let mut client = client(FakePrimary::absent());
        client.send_input_data(UiPayload::default());
        assert_eq!(client.last_command().unwrap().outcome, Outcome::Skipped);
    }

    #[test]
    fn test_get_screen_overlays_non_zero_bytes() {
        let mut primary = FakePrimary::new();
        let mut row = [0u8; ROW_LEN];
        row[..4].copy_from_slice(b"99.9");
        primary.rows[ScreenId::Solar.index()][2] = row;
        let mut client = client(primary);

        let mut frame = Screen::new();
        frame.set_line(2, b"Input:   12.3V/04.5A");
        assert!(client.get_screen_row(ScreenId::Solar, 2, &mut frame));
        assert_eq!(frame.line(2), Some(b"99.9t:   12.3V/04.5A"));
    }

    #[test]
    fn test_partial_row_keeps_prior_content() {
        let mut primary = FakePrimary::new();
        primary.rows[ScreenId::Solar.index()][1] = *b"ABCDEFGHIJKLMNOPQRST";
        primary.truncate_to = Some(5);
        let mut client = client(primary);

        let mut frame = Screen::new();
        assert_eq!(frame.line(1), Some(&BLANK_LINE));
        assert!(!client.get_screen_row(ScreenId::Solar, 1, &mut frame));
        assert_eq!(frame.line(1), Some(b"ABCDE               "));
        assert_eq!(
            client.last_command().unwrap().outcome,
            Outcome::Partial(5)
        );
    }

    #[test]
    fn test_bus_error_keeps_presence() {
        let mut client = present_client();
        client.bus_mut().fail_transactions = true;

        assert_eq!(client.get_config(), None);
        assert_eq!(client.last_command().unwrap().outcome, Outcome::BusError);
        assert!(client.is_present());
    }
}
