//! HLK-LD2410 radar presence sensor driver
//!
//! This crate ties the protocol layer to real hardware through the
//! `ld2410-hal` traits:
//!
//! - [`Ld2410`] - UART driver: initialization, report polling, commands
//! - [`OutputObserver`] - OUT pin edge observation, interrupt safe
//! - [`diagnostics`] - Human-readable snapshot dump
//!
//! The driver is blocking and single-threaded. Everything happens inside
//! calls the application makes; there is no background task.

#![no_std]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible below
mod fmt;

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod observer;

pub use config::Ld2410Config;
pub use driver::Ld2410;
pub use error::Error;
pub use observer::OutputObserver;

pub use ld2410_protocol::{Command, ReportMode, SensorData, TargetState};
