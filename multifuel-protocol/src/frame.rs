//! Command frame encoding and decoding.
//!
//! Frame format:
//! - COMMAND (1 byte): command code
//! - PAYLOAD (4 bytes): command-specific arguments, zero-filled
//!
//! Responses carry no header. Their length is fixed per command, see
//! [`Command::response_len`].

/// Size of every outbound frame
pub const FRAME_LEN: usize = 5;

/// Payload bytes following the command code
pub const PAYLOAD_LEN: usize = 4;

/// Characters in one display row, and bytes in a `GET_SCREEN` response
pub const ROW_LEN: usize = 20;

// Command codes understood by the primary controller
pub const CMD_GET_CONFIG: u8 = 123;
pub const CMD_GET_SOURCE: u8 = 131;
pub const CMD_GET_SETTINGS: u8 = 142;
pub const CMD_GET_SCREEN: u8 = 150;
pub const CMD_SEND_INPUT_DATA: u8 = 169;
pub const CMD_SEND_SETTINGS: u8 = 172;

/// Errors that can occur while encoding or decoding frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Command byte is not a known command code
    UnknownCommand,
    /// Payload exceeds the 4 payload bytes
    PayloadTooLarge,
    /// Input is shorter or longer than the fixed size
    WrongLength,
    /// Payload bytes do not decode to the expected record
    InvalidPayload,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Command codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    GetConfig = CMD_GET_CONFIG,
    GetSource = CMD_GET_SOURCE,
    GetSettings = CMD_GET_SETTINGS,
    GetScreen = CMD_GET_SCREEN,
    SendInputData = CMD_SEND_INPUT_DATA,
    SendSettings = CMD_SEND_SETTINGS,
}

impl Command {
    /// Parse a command from its wire code
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_GET_CONFIG => Some(Command::GetConfig),
            CMD_GET_SOURCE => Some(Command::GetSource),
            CMD_GET_SETTINGS => Some(Command::GetSettings),
            CMD_GET_SCREEN => Some(Command::GetScreen),
            CMD_SEND_INPUT_DATA => Some(Command::SendInputData),
            CMD_SEND_SETTINGS => Some(Command::SendSettings),
            _ => None,
        }
    }

    /// Convert to wire code
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Number of bytes the primary controller answers with
    pub fn response_len(self) -> usize {
        match self {
            Command::GetConfig | Command::GetSettings => PAYLOAD_LEN,
            Command::GetSource => crate::messages::SourcePayload::LEN,
            Command::GetScreen => ROW_LEN,
            Command::SendInputData | Command::SendSettings => 0,
        }
    }

    /// Returns true if the command is followed by a read
    pub fn expects_response(self) -> bool {
        self.response_len() > 0
    }
}

/// A 5-byte outbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    pub command: Command,
    pub payload: [u8; PAYLOAD_LEN],
}

impl CommandFrame {
    /// Create a frame, zero-filling unused payload bytes
    pub fn new(command: Command, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLarge);
        }

        let mut bytes = [0u8; PAYLOAD_LEN];
        bytes[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            command,
            payload: bytes,
        })
    }

    /// Create a frame with an all-zero payload
    pub fn empty(command: Command) -> Self {
        Self {
            command,
            payload: [0; PAYLOAD_LEN],
        }
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if buffer.len() < FRAME_LEN {
            return Err(FrameError::BufferTooSmall);
        }

        buffer[0] = self.command.to_byte();
        buffer[1..FRAME_LEN].copy_from_slice(&self.payload);

        Ok(FRAME_LEN)
    }

    /// Encode this frame into a fixed array
    pub fn to_bytes(&self) -> [u8; FRAME_LEN] {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = self.command.to_byte();
        bytes[1..].copy_from_slice(&self.payload);
        bytes
    }

    /// Decode a frame as written on the wire
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != FRAME_LEN {
            return Err(FrameError::WrongLength);
        }
        let command = Command::from_byte(bytes[0]).ok_or(FrameError::UnknownCommand)?;
        Self::new(command, &bytes[1..])
    }
}
