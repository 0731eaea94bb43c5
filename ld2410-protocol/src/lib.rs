//! HLK-LD2410 Serial Protocol
//!
//! This crate implements the binary framing spoken by the LD2410 radar
//! presence sensor over its UART. It is transport agnostic: bytes go into
//! a [`RingBuffer`], a [`FrameSynchronizer`] carves frames out of them, and
//! the result is either decoded into [`SensorData`] or checked as a command
//! [`Ack`].
//!
//! # Frame Overview
//!
//! Two frame kinds share one layout, told apart by their 4-byte markers.
//! All multi-byte integers are little-endian.
//! ```text
//! ┌─────────────┬────────┬──────────────────────┬─────────────┐
//! │ HEADER      │ LENGTH │ INTRA-FRAME DATA     │ FOOTER      │
//! │ 4B          │ 2B     │ LENGTH bytes         │ 4B          │
//! └─────────────┴────────┴──────────────────────┴─────────────┘
//!
//! report  F4 F3 F2 F1   len   mode AA <targets...>   F8 F7 F6 F5
//! command FD FC FB FA   len   cmd <params...>        04 03 02 01
//! ack     FD FC FB FA   len   cmd|0x0100 status ...  04 03 02 01
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod frame;
pub mod report;
pub mod ring;

pub use command::{cmd, Ack, Command, ACK_FLAG, MAX_PARAMS, MAX_PAYLOAD_SIZE};
pub use frame::{
    Frame, FrameError, FrameKind, FrameSynchronizer, SyncStats, FRAME_OVERHEAD, MAX_FRAME_SIZE,
};
pub use report::{ReportMode, SensorData, TargetState, GATE_COUNT};
pub use ring::{RingBuffer, RX_BUFFER_SIZE};
