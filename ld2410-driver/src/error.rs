//! Driver error types

use core::fmt;

use ld2410_protocol::FrameError;

/// Errors surfaced by [`crate::Ld2410`]
///
/// `E` is the transport's error type. Framing problems on the receive path
/// never show up here; the synchronizer absorbs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The UART reported an error
    Transport(E),
    /// Baud rate the sensor does not support; the UART was not touched
    UnsupportedBaud(u32),
    /// Nothing was received after power-up
    NoData,
    /// No acknowledgement within the command deadline
    Timeout,
    /// Acknowledged with a non-zero status
    Rejected { status: u16 },
    /// Acknowledgement for a different command
    UnexpectedAck { expected: u16, received: u16 },
    /// Command frame too short to be an acknowledgement
    InvalidAck,
    /// Command could not be framed
    InvalidCommand(FrameError),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::UnsupportedBaud(baud) => write!(f, "unsupported baud rate {}", baud),
            Error::NoData => write!(f, "no data received from sensor"),
            Error::Timeout => write!(f, "command timed out"),
            Error::Rejected { status } => write!(f, "command rejected, status {:#06x}", status),
            Error::UnexpectedAck { expected, received } => write!(
                f,
                "expected ack {:#06x}, received {:#06x}",
                expected, received
            ),
            Error::InvalidAck => write!(f, "malformed acknowledgement"),
            Error::InvalidCommand(e) => write!(f, "invalid command: {:?}", e),
        }
    }
}
