//! Human-readable snapshot dump

use core::fmt::{self, Write};

use ld2410_protocol::SensorData;

use crate::driver::Ld2410;

const RULE: &str = "--------------------------------------------------";

/// Write a multi-line description of `data`
///
/// The gate table, light level and OUT pin are only included while the
/// snapshot comes from engineering reports.
pub fn write_report<W: Write>(data: &SensorData, out: &mut W) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "[LD2410] Sensor Data")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "\tTarget State: {:?}", data.target_state)?;
    writeln!(
        out,
        "\tEngineering Mode: {}",
        if data.engineering_mode {
            "Enabled"
        } else {
            "Disabled"
        }
    )?;
    writeln!(
        out,
        "\tMoving Target - Distance: {} cm, Energy: {}",
        data.moving_distance_cm, data.moving_energy
    )?;
    writeln!(
        out,
        "\tStationary Target - Distance: {} cm, Energy: {}",
        data.stationary_distance_cm, data.stationary_energy
    )?;
    writeln!(out, "\tDetection Distance: {} cm", data.detection_distance_cm)?;

    if data.engineering_mode {
        writeln!(out)?;
        writeln!(out, "\tMoving Energy Gates:")?;
        for (gate, energy) in data.moving_gates.iter().enumerate() {
            writeln!(out, "\tGate {}: {}", gate, energy)?;
        }

        writeln!(out)?;
        writeln!(out, "\tStationary Energy Gates:")?;
        for (gate, energy) in data.stationary_gates.iter().enumerate() {
            writeln!(out, "\tGate {}: {}", gate, energy)?;
        }

        writeln!(out)?;
        writeln!(out, "\tLight Sensor Value: {}", data.light)?;
        writeln!(
            out,
            "\tOutput Pin State: {}",
            if data.out_pin { "HIGH" } else { "LOW" }
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

impl<U, C, D> Ld2410<U, C, D> {
    /// Dump the current snapshot to a text sink
    pub fn pretty_print<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_report(self.data(), out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;
    use ld2410_protocol::TargetState;

    #[test]
    fn test_basic_dump_omits_gates() {
        let data = SensorData {
            target_state: TargetState::Stationary,
            stationary_distance_cm: 120,
            stationary_energy: 45,
            detection_distance_cm: 120,
            light: 0x80,
            ..SensorData::default()
        };

        let mut out: String<1024> = String::new();
        write_report(&data, &mut out).unwrap();

        assert!(out.contains("Target State: Stationary"));
        assert!(out.contains("Engineering Mode: Disabled"));
        assert!(out.contains("Stationary Target - Distance: 120 cm, Energy: 45"));
        assert!(!out.contains("Gate 0"));
        assert!(!out.contains("Light Sensor Value"));
    }

    #[test]
    fn test_engineering_dump_lists_gates() {
        let mut data = SensorData {
            engineering_mode: true,
            out_pin: true,
            light: 200,
            ..SensorData::default()
        };
        data.moving_gates[8] = 17;

        let mut out: String<2048> = String::new();
        write_report(&data, &mut out).unwrap();

        assert!(out.contains("Engineering Mode: Enabled"));
        assert!(out.contains("\tGate 8: 17"));
        assert!(out.contains("Light Sensor Value: 200"));
        assert!(out.contains("Output Pin State: HIGH"));
    }

    #[test]
    fn test_small_sink_reports_error() {
        let mut out: String<16> = String::new();
        assert!(write_report(&SensorData::default(), &mut out).is_err());
    }
}
