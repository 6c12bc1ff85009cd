//! Request and response payloads
//!
//! Every 4-byte payload is a struct of `u8` fields serialized with postcard.
//! Postcard writes a `u8` verbatim with no tag or length, so the field order
//! below is exactly the byte order on the wire.

use crate::frame::{Command, CommandFrame, FrameError, PAYLOAD_LEN};
use serde::{Deserialize, Serialize};

/// UI configuration exchanged by `GET_CONFIG` and `SEND_INPUT_DATA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiPayload {
    pub contrast: u8,
    pub ui_mode: u8,
    pub backlight_on: u8,
    pub backlight_color: u8,
}

/// Editable limits of one source, exchanged by `GET_SETTINGS` and
/// `SEND_SETTINGS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsPayload {
    pub screen_id: u8,
    pub min_voltage: u8,
    pub max_voltage: u8,
    pub max_current: u8,
}

/// Encode a 4-byte payload
pub fn encode_payload<T: Serialize>(value: &T) -> Result<[u8; PAYLOAD_LEN], FrameError> {
    let mut buffer = [0u8; PAYLOAD_LEN];
    postcard::to_slice(value, &mut buffer).map_err(|_| FrameError::BufferTooSmall)?;
    Ok(buffer)
}

/// Decode a 4-byte payload
pub fn decode_payload<'de, T: Deserialize<'de>>(bytes: &'de [u8]) -> Result<T, FrameError> {
    if bytes.len() != PAYLOAD_LEN {
        return Err(FrameError::WrongLength);
    }
    postcard::from_bytes(bytes).map_err(|_| FrameError::InvalidPayload)
}

/// Telemetry snapshot of one source, returned by `GET_SOURCE`
///
/// Layout: `screen_id, status, flags, percentage`, then four little-endian
/// `i16`: volts x100, amps x100, watts, degrees C x10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourcePayload {
    pub screen_id: u8,
    pub status: u8,
    pub flags: u8,
    pub percentage: u8,
    pub centivolts: i16,
    pub centiamps: i16,
    pub watts: i16,
    pub decidegrees: i16,
}

impl SourcePayload {
    /// Response size in bytes
    pub const LEN: usize = 12;

    /// Flag bit: source has a temperature sensor
    pub const FLAG_TEMPERATURE: u8 = 0x01;
    /// Flag bit: source estimates state of charge
    pub const FLAG_CHARGE: u8 = 0x02;

    /// Decode a response buffer
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != Self::LEN {
            return Err(FrameError::WrongLength);
        }
        let word = |at: usize| i16::from_le_bytes([bytes[at], bytes[at + 1]]);

        Ok(Self {
            screen_id: bytes[0],
            status: bytes[1],
            flags: bytes[2],
            percentage: bytes[3],
            centivolts: word(4),
            centiamps: word(6),
            watts: word(8),
            decidegrees: word(10),
        })
    }

    /// Encode into a response buffer
    pub fn encode(&self) -> [u8; Self::LEN] {
        let mut bytes = [0u8; Self::LEN];
        bytes[0] = self.screen_id;
        bytes[1] = self.status;
        bytes[2] = self.flags;
        bytes[3] = self.percentage;
        bytes[4..6].copy_from_slice(&self.centivolts.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.centiamps.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.watts.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.decidegrees.to_le_bytes());
        bytes
    }

    pub fn voltage(&self) -> f32 {
        self.centivolts as f32 / 100.0
    }

    pub fn current(&self) -> f32 {
        self.centiamps as f32 / 100.0
    }

    pub fn power(&self) -> f32 {
        self.watts as f32
    }

    pub fn temperature(&self) -> f32 {
        self.decidegrees as f32 / 10.0
    }

    pub fn has_temperature_sensor(&self) -> bool {
        self.flags & Self::FLAG_TEMPERATURE != 0
    }

    pub fn has_charge_estimate(&self) -> bool {
        self.flags & Self::FLAG_CHARGE != 0
    }
}

/// Requests issued by the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Read contrast, UI mode and backlight
    GetConfig,
    /// Read telemetry of one source
    GetSource { screen_id: u8 },
    /// Read the limits of one source
    GetSettings { screen_id: u8 },
    /// Read one 20-character row of a screen
    GetScreen { screen_id: u8, row: u8 },
    /// Push the local UI configuration
    SendInputData(UiPayload),
    /// Push edited limits
    SendSettings(SettingsPayload),
}

impl Request {
    /// Command code of this request
    pub fn command(&self) -> Command {
        match self {
            Request::GetConfig => Command::GetConfig,
            Request::GetSource { .. } => Command::GetSource,
            Request::GetSettings { .. } => Command::GetSettings,
            Request::GetScreen { .. } => Command::GetScreen,
            Request::SendInputData(_) => Command::SendInputData,
            Request::SendSettings(_) => Command::SendSettings,
        }
    }

    /// Encode this request into a frame
    pub fn to_frame(&self) -> Result<CommandFrame, FrameError> {
        let command = self.command();
        match self {
            Request::GetConfig => Ok(CommandFrame::empty(command)),
            Request::GetSource { screen_id } | Request::GetSettings { screen_id } => {
                CommandFrame::new(command, &[*screen_id])
            }
            Request::GetScreen { screen_id, row } => CommandFrame::new(command, &[*screen_id, *row]),
            Request::SendInputData(ui) => CommandFrame::new(command, &encode_payload(ui)?),
            Request::SendSettings(settings) => {
                CommandFrame::new(command, &encode_payload(settings)?)
            }
        }
    }

    /// Parse a request from a frame (primary-controller side and tests)
    pub fn from_frame(frame: &CommandFrame) -> Result<Self, FrameError> {
        let payload = &frame.payload;
        match frame.command {
            Command::GetConfig => Ok(Request::GetConfig),
            Command::GetSource => Ok(Request::GetSource {
                screen_id: payload[0],
            }),
            Command::GetSettings => Ok(Request::GetSettings {
                screen_id: payload[0],
            }),
            Command::GetScreen => Ok(Request::GetScreen {
                screen_id: payload[0],
                row: payload[1],
            }),
            Command::SendInputData => Ok(Request::SendInputData(decode_payload(payload)?)),
            Command::SendSettings => Ok(Request::SendSettings(decode_payload(payload)?)),
        }
    }
}
