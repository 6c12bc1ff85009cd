//! Host fakes for the collaborator traits
//!
//! `FakePrimary` plays the primary controller on the far side of the bus
//! with a non-lossy settings store; the rest record what the UI did to
//! them.

use heapless::HistoryBuffer;
use multifuel_display::{DisplayBackend, DisplayError, Line, BLANK_LINE, SCREEN_COLS, SCREEN_ROWS};
use multifuel_hal::{BacklightDriver, Clock, ConfigStore, I2cBus, Rgb, StorageKey};
use multifuel_protocol::{
    CommandFrame, Request, SettingsPayload, SourcePayload, SourceStatus, UiPayload, ROW_LEN,
};

use crate::catalog::ScreenId;
use crate::config::DEFAULT_PRIMARY_ADDRESS;

pub const PRIMARY_ADDRESS: u8 = DEFAULT_PRIMARY_ADDRESS;

/// Frames kept by `FakePrimary`
pub const FRAME_LOG: usize = 64;

/// Fake bus failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeBusError {
    /// Address not acknowledged
    Nack,
    /// Transaction failed part way
    Aborted,
    /// Frame did not decode
    Malformed,
}

/// Scripted primary controller
pub struct FakePrimary {
    present: bool,
    /// Becomes present on this ping
    present_on_ping: Option<u32>,
    pings: u32,
    frames: HistoryBuffer<CommandFrame, FRAME_LOG>,
    pub config: UiPayload,
    pub settings: [SettingsPayload; ScreenId::COUNT],
    pub sources: [SourcePayload; ScreenId::COUNT],
    pub rows: [[Line; SCREEN_ROWS]; ScreenId::COUNT],
    /// Cut every response short
    pub truncate_to: Option<usize>,
    /// Fail every non-ping transaction
    pub fail_transactions: bool,
}

impl Default for FakePrimary {
    fn default() -> Self {
        Self::new()
    }
}

impl FakePrimary {
    /// A present controller with default limits and zero rows
    pub fn new() -> Self {
        let settings = core::array::from_fn(|index| SettingsPayload {
            screen_id: index as u8,
            min_voltage: 0,
            max_voltage: 55,
            max_current: 55,
        });
        let sources = core::array::from_fn(|index| SourcePayload {
            screen_id: index as u8,
            status: SourceStatus::NotFound.to_byte(),
            ..SourcePayload::default()
        });

        Self {
            present: true,
            present_on_ping: None,
            pings: 0,
            frames: HistoryBuffer::new(),
            config: UiPayload {
                contrast: 5,
                ui_mode: 0,
                backlight_on: 1,
                backlight_color: 0,
            },
            settings,
            sources,
            rows: [[[0; ROW_LEN]; SCREEN_ROWS]; ScreenId::COUNT],
            truncate_to: None,
            fail_transactions: false,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new()
        }
    }

    /// Absent until the `ping`th ping (1-based)
    pub fn present_after_pings(ping: u32) -> Self {
        Self {
            present: false,
            present_on_ping: Some(ping),
            ..Self::new()
        }
    }

    pub fn set_present(&mut self, present: bool) {
        self.present = present;
        self.present_on_ping = None;
    }

    pub fn pings(&self) -> u32 {
        self.pings
    }

    /// Frames received, oldest first
    pub fn frames(&self) -> heapless::Vec<CommandFrame, FRAME_LOG> {
        self.frames.oldest_ordered().copied().collect()
    }

    /// Requests received, oldest first
    pub fn requests(&self) -> heapless::Vec<Request, FRAME_LOG> {
        self.frames
            .oldest_ordered()
            .filter_map(|frame| Request::from_frame(frame).ok())
            .collect()
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    fn check(&self, address: u8) -> Result<(), FakeBusError> {
        if !self.present || address != PRIMARY_ADDRESS {
            return Err(FakeBusError::Nack);
        }
        if self.fail_transactions {
            return Err(FakeBusError::Aborted);
        }
        Ok(())
    }

    fn receive(&mut self, data: &[u8]) -> Result<Request, FakeBusError> {
        let frame = CommandFrame::decode(data).map_err(|_| FakeBusError::Malformed)?;
        self.frames.write(frame);
        Request::from_frame(&frame).map_err(|_| FakeBusError::Malformed)
    }

    fn respond(&self, request: &Request, buf: &mut [u8]) -> usize {
        let mut response = [0u8; ROW_LEN];
        let len = match *request {
            Request::GetConfig => {
                response[..4].copy_from_slice(&[
                    self.config.contrast,
                    self.config.ui_mode,
                    self.config.backlight_on,
                    self.config.backlight_color,
                ]);
                4
            }
            Request::GetSettings { screen_id } => {
                let Some(s) = self.settings.get(screen_id as usize) else {
                    return 0;
                };
                response[..4].copy_from_slice(&[
                    s.screen_id,
                    s.min_voltage,
                    s.max_voltage,
                    s.max_current,
                ]);
                4
            }
            Request::GetSource { screen_id } => {
                let Some(source) = self.sources.get(screen_id as usize) else {
                    return 0;
                };
                response[..SourcePayload::LEN].copy_from_slice(&source.encode());
                SourcePayload::LEN
            }
            Request::GetScreen { screen_id, row } => {
                let Some(line) = self
                    .rows
                    .get(screen_id as usize)
                    .and_then(|rows| rows.get(row as usize))
                else {
                    return 0;
                };
                response.copy_from_slice(line);
                ROW_LEN
            }
            Request::SendInputData(_) | Request::SendSettings(_) => 0,
        };

        let len = self.truncate_to.map_or(len, |limit| len.min(limit)).min(buf.len());
        buf[..len].copy_from_slice(&response[..len]);
        len
    }
}

impl I2cBus for FakePrimary {
    type Error = FakeBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            self.pings += 1;
            if self.present_on_ping == Some(self.pings) {
                self.present = true;
            }
            return if self.present && address == PRIMARY_ADDRESS {
                Ok(())
            } else {
                Err(FakeBusError::Nack)
            };
        }

        self.check(address)?;
        match self.receive(data)? {
            Request::SendInputData(ui) => self.config = ui,
            Request::SendSettings(settings) => {
                if let Some(slot) = self.settings.get_mut(settings.screen_id as usize) {
                    *slot = settings;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn read(&mut self, address: u8, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.check(address)?;
        Ok(0)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.check(address)?;
        let request = self.receive(write_data)?;
        Ok(self.respond(&request, read_buf))
    }
}

/// Character display that keeps what was written
pub struct RecordingDisplay {
    pub lines: [Line; SCREEN_ROWS],
    pub clears: u32,
    /// Row writes, in order
    pub row_writes: heapless::Vec<u8, 256>,
    pub cursor: (u8, u8),
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            lines: [BLANK_LINE; SCREEN_ROWS],
            clears: 0,
            row_writes: heapless::Vec::new(),
            cursor: (0, 0),
        }
    }

    pub fn line(&self, row: usize) -> &Line {
        &self.lines[row]
    }
}

impl DisplayBackend for RecordingDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lines = [BLANK_LINE; SCREEN_ROWS];
        self.clears += 1;
        Ok(())
    }

    fn write_at(&mut self, row: u8, col: u8, text: &[u8]) -> Result<(), DisplayError> {
        multifuel_display::backend::check_bounds(self.dimensions(), row, col, text.len())?;
        let start = col as usize;
        self.lines[row as usize][start..start + text.len()].copy_from_slice(text);
        let _ = self.row_writes.push(row);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.cursor = (row, col);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        true
    }
}

/// Erased-on-start preference store
pub struct MemoryStore {
    cells: [u8; StorageKey::COUNT],
    writes: u32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            cells: [multifuel_hal::store::ERASED; StorageKey::COUNT],
            writes: 0,
        }
    }

    pub fn cell(&self, key: StorageKey) -> u8 {
        self.cells[key.as_u8() as usize]
    }

    /// Number of writes that reached the store
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ConfigStore for MemoryStore {
    fn read(&mut self, key: StorageKey) -> u8 {
        self.cell(key)
    }

    fn write(&mut self, key: StorageKey, value: u8) {
        self.cells[key.as_u8() as usize] = value;
        self.writes += 1;
    }
}

/// Clock advanced by hand; `delay_ms` moves it forward
#[derive(Debug, Default)]
pub struct ManualClock {
    now: u32,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }

    pub fn set(&mut self, now: u32) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

/// Backlight that remembers the last colour and contrast
#[derive(Debug, Default)]
pub struct RecordingBacklight {
    pub rgb: Rgb,
    pub contrast: u8,
    pub updates: u32,
}

impl BacklightDriver for RecordingBacklight {
    fn set_rgb(&mut self, rgb: Rgb) {
        self.rgb = rgb;
        self.updates += 1;
    }

    fn set_contrast(&mut self, contrast: u8) {
        self.contrast = contrast;
        self.updates += 1;
    }
}
