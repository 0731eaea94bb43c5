//! Frame synchronization for the LD2410 protocol.
//!
//! Frame format:
//! - HEADER (4 bytes): kind-specific start marker
//! - LENGTH (2 bytes): intra-frame data length, little-endian
//! - DATA (LENGTH bytes)
//! - FOOTER (4 bytes): kind-specific end marker
//!
//! The synchronizer trusts the footer rather than LENGTH to find the end
//! of a frame. LENGTH is only used to reject frames that could never fit.

use heapless::Vec;

use crate::ring::RingBuffer;

/// Maximum complete frame size, markers included
pub const MAX_FRAME_SIZE: usize = 64;

/// Bytes of a frame that are not intra-frame data (header + length + footer)
pub const FRAME_OVERHEAD: usize = 4 + 2 + 4;

/// Offset of the little-endian LENGTH field
const LENGTH_OFFSET: usize = 4;

/// Smallest accumulation at which a footer can follow a full header
const MIN_FRAME_SIZE: usize = 8;

/// Errors from building frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Data would not fit in [`MAX_FRAME_SIZE`]
    PayloadTooLarge,
    /// Declared LENGTH disagrees with the bytes supplied
    LengthMismatch,
    /// Invalid frame structure
    InvalidFrame,
}

/// The two frame families on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Target report streamed by the sensor
    Report,
    /// Command from the host or its acknowledgement
    Command,
}

impl FrameKind {
    /// Start marker for this kind
    pub const fn header(self) -> [u8; 4] {
        match self {
            FrameKind::Report => [0xF4, 0xF3, 0xF2, 0xF1],
            FrameKind::Command => [0xFD, 0xFC, 0xFB, 0xFA],
        }
    }

    /// End marker for this kind
    pub const fn footer(self) -> [u8; 4] {
        match self {
            FrameKind::Report => [0xF8, 0xF7, 0xF6, 0xF5],
            FrameKind::Command => [0x04, 0x03, 0x02, 0x01],
        }
    }

    /// Identify a frame kind from the first byte of its header
    pub fn from_start_byte(byte: u8) -> Option<Self> {
        match byte {
            0xF4 => Some(FrameKind::Report),
            0xFD => Some(FrameKind::Command),
            _ => None,
        }
    }
}

/// A completed frame, borrowed from the synchronizer's working buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Which marker pair delimited the frame
    pub kind: FrameKind,
    /// Raw bytes, header through footer
    pub bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    /// LENGTH as declared by the sender
    pub fn declared_len(&self) -> u16 {
        match self.bytes.get(LENGTH_OFFSET..LENGTH_OFFSET + 2) {
            Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
            _ => 0,
        }
    }

    /// Bytes between LENGTH and the footer
    ///
    /// This is what was actually received, which can differ from
    /// [`Frame::declared_len`] on a corrupted frame.
    pub fn data(&self) -> &'a [u8] {
        let start = LENGTH_OFFSET + 2;
        let end = self.bytes.len().saturating_sub(4).max(start);
        &self.bytes[start..end]
    }
}

/// Counters for synchronizer activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncStats {
    /// Frames completed
    pub frames: u32,
    /// Partial frames thrown away (bad header, bad length, overflow)
    pub abandoned: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    /// Waiting for a start byte
    Idle,
    /// Collecting a frame of the given kind
    Accumulating(FrameKind),
}

/// State machine carving frames out of a byte stream
///
/// Once a frame completes its bytes stay available through
/// [`FrameSynchronizer::frame`] until the next start byte arrives.
#[derive(Debug, Clone)]
pub struct FrameSynchronizer {
    state: SyncState,
    buffer: Vec<u8, MAX_FRAME_SIZE>,
    last: Option<FrameKind>,
    stats: SyncStats,
}

impl Default for FrameSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSynchronizer {
    /// Create an idle synchronizer
    pub const fn new() -> Self {
        Self {
            state: SyncState::Idle,
            buffer: Vec::new(),
            last: None,
            stats: SyncStats {
                frames: 0,
                abandoned: 0,
            },
        }
    }

    /// Drop any frame in progress
    pub fn reset(&mut self) {
        self.state = SyncState::Idle;
        self.buffer.clear();
        self.last = None;
    }

    /// Check if a frame is partially collected
    pub fn in_frame(&self) -> bool {
        matches!(self.state, SyncState::Accumulating(_))
    }

    /// Activity counters
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// The most recently completed frame, if it is still intact
    pub fn frame(&self) -> Option<Frame<'_>> {
        self.last.map(|kind| Frame {
            kind,
            bytes: &self.buffer,
        })
    }

    /// Drain `ring` until a frame completes or the ring is empty
    ///
    /// Bytes after the completed frame stay in the ring for the next call.
    pub fn process<const N: usize>(&mut self, ring: &mut RingBuffer<N>) -> Option<Frame<'_>> {
        while let Some(byte) = ring.pop() {
            if self.feed(byte).is_some() {
                return self.frame();
            }
        }
        None
    }

    /// Feed a single byte
    ///
    /// Returns the kind of frame completed by this byte, if any. The frame
    /// itself is then available from [`FrameSynchronizer::frame`].
    pub fn feed(&mut self, byte: u8) -> Option<FrameKind> {
        let kind = match self.state {
            SyncState::Idle => {
                self.try_start(byte);
                return None;
            }
            SyncState::Accumulating(kind) => kind,
        };

        if self.buffer.push(byte).is_err() {
            // Footer never showed up within MAX_FRAME_SIZE
            self.abandon(byte);
            return None;
        }

        let len = self.buffer.len();
        let header = kind.header();

        if len <= header.len() && self.buffer[len - 1] != header[len - 1] {
            self.abandon(byte);
            return None;
        }

        if len == LENGTH_OFFSET + 2 {
            let declared = u16::from_le_bytes([
                self.buffer[LENGTH_OFFSET],
                self.buffer[LENGTH_OFFSET + 1],
            ]);
            if declared as usize + FRAME_OVERHEAD > MAX_FRAME_SIZE {
                self.abandon(byte);
                return None;
            }
        }

        if len >= MIN_FRAME_SIZE
            && self.buffer.starts_with(&header)
            && self.buffer.ends_with(&kind.footer())
        {
            self.state = SyncState::Idle;
            self.last = Some(kind);
            self.stats.frames = self.stats.frames.wrapping_add(1);
            return Some(kind);
        }

        None
    }

    /// Begin a new frame if `byte` is a start byte
    fn try_start(&mut self, byte: u8) {
        if let Some(kind) = FrameKind::from_start_byte(byte) {
            self.buffer.clear();
            // Cannot fail: buffer was just cleared
            let _ = self.buffer.push(byte);
            self.state = SyncState::Accumulating(kind);
            self.last = None;
        }
    }

    /// Give up on the current frame and re-examine `byte` as a start byte
    fn abandon(&mut self, byte: u8) {
        self.stats.abandoned = self.stats.abandoned.wrapping_add(1);
        self.buffer.clear();
        self.state = SyncState::Idle;
        self.last = None;
        self.try_start(byte);
    }
}
