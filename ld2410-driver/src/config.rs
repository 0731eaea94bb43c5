//! Driver configuration

/// Timing and line settings for [`crate::Ld2410`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ld2410Config {
    /// UART baud rate; must be one the sensor supports
    pub baudrate: u32,
    /// Wait after configuring the UART before expecting data (ms)
    pub power_up_delay_ms: u32,
    /// Deadline for a command acknowledgement (ms)
    pub command_timeout_ms: u32,
    /// Pause between the exchanges of a configuration sequence (ms)
    pub settle_delay_ms: u32,
    /// Pause between receive polls while waiting for an ack (µs)
    pub poll_interval_us: u32,
}

impl Default for Ld2410Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Ld2410Config {
    /// Factory defaults: 256000 baud, 1 s command deadline
    pub const fn new() -> Self {
        Self {
            baudrate: 256_000,
            power_up_delay_ms: 500,
            command_timeout_ms: 1000,
            settle_delay_ms: 1000,
            poll_interval_us: 500,
        }
    }

    /// Use a different baud rate
    pub const fn with_baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }

    /// Use a different wait before expecting data after power-up
    pub const fn with_power_up_delay_ms(mut self, delay_ms: u32) -> Self {
        self.power_up_delay_ms = delay_ms;
        self
    }

    /// Use a different acknowledgement deadline
    pub const fn with_command_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.command_timeout_ms = timeout_ms;
        self
    }

    /// Use a different settle delay between sequenced commands
    pub const fn with_settle_delay_ms(mut self, delay_ms: u32) -> Self {
        self.settle_delay_ms = delay_ms;
        self
    }

    /// Use a different pause between receive polls while awaiting an ack
    pub const fn with_poll_interval_us(mut self, interval_us: u32) -> Self {
        self.poll_interval_us = interval_us;
        self
    }
}
