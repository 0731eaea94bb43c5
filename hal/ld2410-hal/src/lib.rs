//! LD2410 Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the LD2410 driver needs: a byte
//! oriented serial link, a digital input with edge interrupts, and a
//! monotonic clock. Board support code implements these traits; the
//! protocol and driver crates only ever talk to them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (poll loop, callbacks)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ld2410-driver                          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ld2410-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-io   │       │ board-specific│
//! │ (IoUart)      │       │ impls         │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::ConfigurableUart`] - Runtime line configuration
//! - [`gpio::InputPin`], [`gpio::EdgeInterrupt`] - Digital input observation
//! - [`time::Monotonic`] - Deadline clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{EdgeInterrupt, InputPin, ObservablePin};
pub use time::Monotonic;
pub use uart::{
    BaudRate, ConfigurableUart, ErrorType, IoUart, Uart, UartConfig, UartRx, UartTx,
    UnsupportedBaud,
};
