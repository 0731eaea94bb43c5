//! Command frames and their acknowledgements
//!
//! A command's intra-frame data is a little-endian command word followed
//! by parameters. The sensor answers with a frame of the same kind whose
//! command word has [`ACK_FLAG`] set, followed by a status word that is
//! zero on success.

use heapless::Vec;

use crate::frame::{Frame, FrameError, FrameKind, FRAME_OVERHEAD, MAX_FRAME_SIZE};

/// Bit set in the command word of an acknowledgement
pub const ACK_FLAG: u16 = 0x0100;

/// Maximum parameter bytes after the command word
pub const MAX_PARAMS: usize = MAX_FRAME_SIZE - FRAME_OVERHEAD - 2;

/// Maximum payload size (LENGTH + command word + parameters)
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - 8;

/// Command words used by the driver
pub mod cmd {
    /// Enter configuration mode
    pub const ENABLE_CONFIG: u16 = 0x00FF;
    /// Leave configuration mode
    pub const END_CONFIG: u16 = 0x00FE;
    /// Switch reports to engineering mode
    pub const ENABLE_ENGINEERING: u16 = 0x0062;
    /// Switch reports back to basic mode
    pub const DISABLE_ENGINEERING: u16 = 0x0063;
}

/// A command ready to be framed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    word: u16,
    params: Vec<u8, MAX_PARAMS>,
}

impl Command {
    /// Create a command from its word and parameters
    pub fn new(word: u16, params: &[u8]) -> Result<Self, FrameError> {
        let mut vec = Vec::new();
        vec.extend_from_slice(params)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { word, params: vec })
    }

    /// Parse a pre-built payload: `[len_lo len_hi cmd_lo cmd_hi params...]`
    ///
    /// The declared length must match the bytes that follow it.
    pub fn from_payload(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() < 4 {
            return Err(FrameError::InvalidFrame);
        }
        let declared = u16::from_le_bytes([payload[0], payload[1]]) as usize;
        if declared != payload.len() - 2 {
            return Err(FrameError::LengthMismatch);
        }
        let word = u16::from_le_bytes([payload[2], payload[3]]);
        Self::new(word, &payload[4..])
    }

    /// Enter configuration mode
    pub fn enable_config() -> Self {
        Self::fixed(cmd::ENABLE_CONFIG, &[0x01, 0x00])
    }

    /// Leave configuration mode
    pub fn end_config() -> Self {
        Self::fixed(cmd::END_CONFIG, &[])
    }

    /// Switch reports to engineering mode
    pub fn enable_engineering() -> Self {
        Self::fixed(cmd::ENABLE_ENGINEERING, &[])
    }

    /// Switch reports back to basic mode
    pub fn disable_engineering() -> Self {
        Self::fixed(cmd::DISABLE_ENGINEERING, &[])
    }

    fn fixed(word: u16, params: &[u8]) -> Self {
        let mut vec = Vec::new();
        // Fixed parameters are far below MAX_PARAMS
        let _ = vec.extend_from_slice(params);
        Self { word, params: vec }
    }

    /// Command word
    pub fn word(&self) -> u16 {
        self.word
    }

    /// Parameter bytes
    pub fn params(&self) -> &[u8] {
        &self.params
    }

    /// Command word the sensor answers with
    pub fn expected_ack(&self) -> u16 {
        self.word | ACK_FLAG
    }

    /// Payload as sent between the markers: LENGTH, command word, parameters
    pub fn payload(&self) -> Vec<u8, MAX_PAYLOAD_SIZE> {
        let length = (2 + self.params.len()) as u16;
        let mut vec = Vec::new();
        // Sizes are bounded by MAX_PARAMS
        let _ = vec.extend_from_slice(&length.to_le_bytes());
        let _ = vec.extend_from_slice(&self.word.to_le_bytes());
        let _ = vec.extend_from_slice(&self.params);
        vec
    }

    /// Encode the complete frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let payload = self.payload();
        let frame_len = 8 + payload.len();
        if buffer.len() < frame_len {
            return Err(FrameError::PayloadTooLarge);
        }

        buffer[..4].copy_from_slice(&FrameKind::Command.header());
        buffer[4..4 + payload.len()].copy_from_slice(&payload);
        buffer[4 + payload.len()..frame_len].copy_from_slice(&FrameKind::Command.footer());

        Ok(frame_len)
    }

    /// Encode the complete frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(vec)
    }
}

/// A parsed acknowledgement frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack<'a> {
    /// Command word with [`ACK_FLAG`] set
    pub code: u16,
    /// Zero on success
    pub status: u16,
    /// Remaining intra-frame data after the status word
    pub data: &'a [u8],
}

impl<'a> Ack<'a> {
    /// Parse an acknowledgement from a completed command-kind frame
    ///
    /// Returns `None` for report frames or frames too short to carry a
    /// command word and status.
    pub fn parse(frame: &Frame<'a>) -> Option<Self> {
        if frame.kind != FrameKind::Command {
            return None;
        }
        let data = frame.data();
        if data.len() < 4 {
            return None;
        }
        Some(Self {
            code: u16::from_le_bytes([data[0], data[1]]),
            status: u16::from_le_bytes([data[2], data[3]]),
            data: &data[4..],
        })
    }

    /// Check if this acknowledges `command`
    pub fn acknowledges(&self, command: &Command) -> bool {
        self.code == command.expected_ack()
    }

    /// Check if the sensor reported success
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}
