//! Target report decoding
//!
//! Report frames carry a mode byte and an 0xAA sub-header, then fixed
//! target fields. Engineering mode appends per-gate energies and the
//! light / OUT pin readings.
//!
//! ```text
//! offset  field
//!  6      mode (0x01 engineering, 0x02 basic)
//!  7      0xAA
//!  8      target state
//!  9-10   moving distance (cm)
//!  11     moving energy
//!  12-13  stationary distance (cm)
//!  14     stationary energy
//!  15-16  detection distance (cm)
//!  -- engineering only --
//!  17     max moving gate
//!  18     max stationary gate
//!  19-27  moving gate energies
//!  28-36  stationary gate energies
//!  37     light sensor
//!  38     OUT pin
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of distance gates reported in engineering mode
pub const GATE_COUNT: usize = 9;

/// Intra-frame sub-header preceding target data
const REPORT_HEAD: u8 = 0xAA;

const MODE_OFFSET: usize = 6;
const HEAD_OFFSET: usize = 7;
const TARGET_OFFSET: usize = 8;
const MAX_GATE_OFFSET: usize = 17;
const MOVING_GATES_OFFSET: usize = 19;
const STATIONARY_GATES_OFFSET: usize = MOVING_GATES_OFFSET + GATE_COUNT;
const LIGHT_OFFSET: usize = STATIONARY_GATES_OFFSET + GATE_COUNT;
const OUT_PIN_OFFSET: usize = LIGHT_OFFSET + 1;

/// End of the basic fields, exclusive
const BASIC_END: usize = MAX_GATE_OFFSET;
/// End of the engineering fields, exclusive
const ENGINEERING_END: usize = OUT_PIN_OFFSET + 1;
/// Footer bytes that must follow the fields
const FOOTER_LEN: usize = 4;

/// Report flavour selected by the mode byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReportMode {
    /// Target fields plus per-gate energies
    Engineering,
    /// Target fields only
    Basic,
}

impl ReportMode {
    /// Decode the mode byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(ReportMode::Engineering),
            0x02 => Some(ReportMode::Basic),
            _ => None,
        }
    }

    /// Encode to the mode byte
    pub fn to_byte(self) -> u8 {
        match self {
            ReportMode::Engineering => 0x01,
            ReportMode::Basic => 0x02,
        }
    }
}

/// What the radar currently sees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TargetState {
    #[default]
    None = 0x00,
    Moving = 0x01,
    Stationary = 0x02,
    Both = 0x03,
}

impl TargetState {
    /// Decode the target state byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(TargetState::None),
            0x01 => Some(TargetState::Moving),
            0x02 => Some(TargetState::Stationary),
            0x03 => Some(TargetState::Both),
            _ => None,
        }
    }

    /// Encode to the target state byte
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// Check if a moving target is reported
    pub fn has_moving(self) -> bool {
        matches!(self, TargetState::Moving | TargetState::Both)
    }

    /// Check if a stationary target is reported
    pub fn has_stationary(self) -> bool {
        matches!(self, TargetState::Stationary | TargetState::Both)
    }
}

/// Latest decoded measurement
///
/// Engineering fields keep their last value while basic reports arrive;
/// check [`SensorData::engineering_mode`] before trusting them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorData {
    /// Detected target kinds
    pub target_state: TargetState,
    /// Moving target distance (cm)
    pub moving_distance_cm: u16,
    /// Moving target energy (0-100)
    pub moving_energy: u8,
    /// Stationary target distance (cm)
    pub stationary_distance_cm: u16,
    /// Stationary target energy (0-100)
    pub stationary_energy: u8,
    /// Overall detection distance (cm)
    pub detection_distance_cm: u16,
    /// Last accepted report was an engineering report
    pub engineering_mode: bool,
    /// Farthest gate configured for moving targets
    pub max_moving_gate: u8,
    /// Farthest gate configured for stationary targets
    pub max_stationary_gate: u8,
    /// Moving target energy per gate
    pub moving_gates: [u8; GATE_COUNT],
    /// Stationary target energy per gate
    pub stationary_gates: [u8; GATE_COUNT],
    /// Ambient light sensor value
    pub light: u8,
    /// OUT pin level as reported by the sensor
    pub out_pin: bool,
}

impl SensorData {
    /// Check if any target is present
    pub fn presence(&self) -> bool {
        self.target_state != TargetState::None
    }

    /// Decode a completed report frame into this snapshot
    ///
    /// `frame` is the raw frame, header through footer. Frames with an
    /// unknown mode, a missing 0xAA sub-header, an invalid target state or
    /// too few bytes for their mode leave the snapshot untouched and
    /// return `None`.
    pub fn apply_frame(&mut self, frame: &[u8]) -> Option<ReportMode> {
        let mode = ReportMode::from_byte(*frame.get(MODE_OFFSET)?)?;
        if *frame.get(HEAD_OFFSET)? != REPORT_HEAD {
            return None;
        }

        let required = match mode {
            ReportMode::Basic => BASIC_END,
            ReportMode::Engineering => ENGINEERING_END,
        };
        if frame.len() < required + FOOTER_LEN {
            return None;
        }

        let mut next = *self;
        next.target_state = TargetState::from_byte(frame[TARGET_OFFSET])?;
        next.moving_distance_cm = read_u16(frame, 9);
        next.moving_energy = frame[11];
        next.stationary_distance_cm = read_u16(frame, 12);
        next.stationary_energy = frame[14];
        next.detection_distance_cm = read_u16(frame, 15);
        next.engineering_mode = mode == ReportMode::Engineering;

        if mode == ReportMode::Engineering {
            next.max_moving_gate = frame[MAX_GATE_OFFSET];
            next.max_stationary_gate = frame[MAX_GATE_OFFSET + 1];
            next.moving_gates
                .copy_from_slice(&frame[MOVING_GATES_OFFSET..STATIONARY_GATES_OFFSET]);
            next.stationary_gates
                .copy_from_slice(&frame[STATIONARY_GATES_OFFSET..LIGHT_OFFSET]);
            next.light = frame[LIGHT_OFFSET];
            next.out_pin = frame[OUT_PIN_OFFSET] == 0x01;
        }

        *self = next;
        Some(mode)
    }
}

fn read_u16(frame: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([frame[offset], frame[offset + 1]])
}
