//! LD2410 driver
//!
//! Owns the UART and everything between it and the application: the
//! receive ring, the frame synchronizer and the current [`SensorData`].
//! The application calls [`Ld2410::poll`] from its main loop; command
//! methods run the same receive path internally while they wait for the
//! sensor to answer.
//!
//! # Command exchange
//!
//! ```text
//!  host                               sensor
//!   │  FD FC FB FA len cmd .. 04 03 02 01  │
//!   │ ───────────────────────────────────▶ │
//!   │                                      │
//!   │  FD FC FB FA len cmd|0100 status ..  │
//!   │ ◀─────────────────────────────────── │
//! ```
//!
//! Every exchange is single-shot: one command, at most one answer, no
//! retries. A wrong answer fails immediately; no answer fails at the
//! deadline.

use embedded_hal::delay::DelayNs;
use ld2410_hal::{BaudRate, ConfigurableUart, Monotonic, Uart, UartConfig, UnsupportedBaud};
use ld2410_protocol::{
    Ack, Command, Frame, FrameKind, FrameSynchronizer, RingBuffer, SensorData, SyncStats,
};

use crate::config::Ld2410Config;
use crate::error::Error;

/// Driver result type for transport `U`
pub type Result<T, U> = core::result::Result<T, Error<<U as ld2410_hal::ErrorType>::Error>>;

/// LD2410 radar driver
///
/// - `U`: UART connected to the sensor
/// - `C`: monotonic clock for command deadlines
/// - `D`: delay provider for settle times and the wait loop
pub struct Ld2410<U, C, D> {
    uart: U,
    clock: C,
    delay: D,
    config: Ld2410Config,
    rx: RingBuffer,
    sync: FrameSynchronizer,
    data: SensorData,
    /// Ring overflow count already reported
    dropped_seen: u32,
    /// Abandoned frame count already reported
    abandoned_seen: u32,
}

impl<U, C, D> Ld2410<U, C, D> {
    /// Create a driver; nothing is sent until [`Ld2410::begin`] or a command
    pub fn new(uart: U, clock: C, delay: D, config: Ld2410Config) -> Self {
        Self {
            uart,
            clock,
            delay,
            config,
            rx: RingBuffer::new(),
            sync: FrameSynchronizer::new(),
            data: SensorData::default(),
            dropped_seen: 0,
            abandoned_seen: 0,
        }
    }

    /// Latest decoded measurement
    pub fn data(&self) -> &SensorData {
        &self.data
    }

    /// Active configuration
    pub fn config(&self) -> &Ld2410Config {
        &self.config
    }

    /// Frame synchronizer counters
    pub fn sync_stats(&self) -> SyncStats {
        self.sync.stats()
    }

    /// Received bytes lost to ring overflow
    pub fn dropped_bytes(&self) -> u32 {
        self.rx.dropped()
    }

    /// Give back the UART, clock and delay
    pub fn release(self) -> (U, C, D) {
        (self.uart, self.clock, self.delay)
    }
}

impl<U, C, D> Ld2410<U, C, D>
where
    U: Uart + ConfigurableUart,
    C: Monotonic,
    D: DelayNs,
{
    /// Configure the UART and check that the sensor is talking
    ///
    /// The baud rate is validated before the UART is touched. After the
    /// power-up delay at least one byte must be waiting, since the sensor
    /// streams reports on its own.
    pub fn begin(&mut self) -> Result<(), U> {
        let baudrate = BaudRate::try_from(self.config.baudrate).map_err(|UnsupportedBaud(baud)| {
            warn!("Baud rate {} is not supported", baud);
            Error::UnsupportedBaud(baud)
        })?;

        self.uart
            .apply_config(&UartConfig::new(baudrate))
            .map_err(Error::Transport)?;
        self.delay.delay_ms(self.config.power_up_delay_ms);

        if self.uart.bytes_available().map_err(Error::Transport)? {
            info!("UART initialized at {} baud", baudrate.as_u32());
            Ok(())
        } else {
            warn!("No data from sensor after power-up");
            Err(Error::NoData)
        }
    }
}

impl<U, C, D> Ld2410<U, C, D>
where
    U: Uart,
    C: Monotonic,
    D: DelayNs,
{
    /// Move waiting UART bytes into the ring and decode any complete reports
    ///
    /// Returns `true` if the snapshot was updated. Acknowledgements that
    /// arrive outside a command exchange are discarded.
    pub fn poll(&mut self) -> Result<bool, U> {
        self.drain_uart()?;

        let mut updated = false;
        while let Some(frame) = self.sync.process(&mut self.rx) {
            match frame.kind {
                FrameKind::Report => updated |= interpret(&mut self.data, &frame),
                FrameKind::Command => trace!("Dropping command frame outside an exchange"),
            }
        }
        self.report_sync_losses();
        Ok(updated)
    }

    /// Send a command and wait for its acknowledgement
    ///
    /// Blocks for at most the configured command timeout. Reports received
    /// while waiting still update the snapshot.
    pub fn send_command(&mut self, command: &Command) -> Result<(), U> {
        let frame = command.encode_to_vec().map_err(Error::InvalidCommand)?;

        // Anything already buffered predates this command
        self.poll()?;

        debug!("Sending command {:#x}", command.word());
        self.uart.write_blocking(&frame).map_err(Error::Transport)?;
        self.uart.flush().map_err(Error::Transport)?;

        let start = self.clock.now_ms();
        let timeout = u64::from(self.config.command_timeout_ms);

        while self.clock.elapsed_ms(start) < timeout {
            self.drain_uart()?;

            while let Some(frame) = self.sync.process(&mut self.rx) {
                match frame.kind {
                    FrameKind::Report => {
                        interpret(&mut self.data, &frame);
                    }
                    FrameKind::Command => return check_ack(&frame, command),
                }
            }

            self.delay.delay_us(self.config.poll_interval_us);
        }

        self.report_sync_losses();
        warn!("Command {:#x} timed out", command.word());
        Err(Error::Timeout)
    }

    /// Put the sensor into configuration mode
    pub fn enter_config_mode(&mut self) -> Result<(), U> {
        self.send_command(&Command::enable_config())
    }

    /// Return the sensor to normal operation
    pub fn exit_config_mode(&mut self) -> Result<(), U> {
        self.send_command(&Command::end_config())
    }

    /// Switch the sensor to engineering reports
    pub fn enable_engineering_mode(&mut self) -> Result<(), U> {
        self.run_configured(&Command::enable_engineering())
    }

    /// Switch the sensor back to basic reports
    pub fn disable_engineering_mode(&mut self) -> Result<(), U> {
        self.run_configured(&Command::disable_engineering())
    }

    /// Run `command` inside a configuration mode session
    ///
    /// The result is the command's own. Failing to leave configuration
    /// mode afterwards is only logged; failing to enter aborts.
    fn run_configured(&mut self, command: &Command) -> Result<(), U> {
        if let Err(e) = self.enter_config_mode() {
            warn!("Failed to enter config mode");
            return Err(e);
        }

        self.delay.delay_ms(self.config.settle_delay_ms);
        let result = self.send_command(command);
        self.delay.delay_ms(self.config.settle_delay_ms);

        if self.exit_config_mode().is_err() {
            warn!("Failed to exit config mode");
        }
        result
    }

    /// Copy waiting UART bytes into the ring
    ///
    /// Stops once the ring is full, so bytes still unread from an earlier
    /// drain are never overwritten and a chatty sensor cannot keep the
    /// caller here forever.
    fn drain_uart(&mut self) -> Result<usize, U> {
        let mut count = 0;
        while self.rx.len() < self.rx.capacity() {
            match self.uart.read_byte().map_err(Error::Transport)? {
                Some(byte) => {
                    self.rx.push(byte);
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn report_sync_losses(&mut self) {
        let dropped = self.rx.dropped();
        if dropped != self.dropped_seen {
            warn!(
                "Receive buffer overflow, {} bytes lost",
                dropped.wrapping_sub(self.dropped_seen)
            );
            self.dropped_seen = dropped;
        }

        let abandoned = self.sync.stats().abandoned;
        if abandoned != self.abandoned_seen {
            debug!(
                "Abandoned {} malformed frames",
                abandoned.wrapping_sub(self.abandoned_seen)
            );
            self.abandoned_seen = abandoned;
        }
    }
}

/// Decode a report into the snapshot, returning whether it was accepted
fn interpret(data: &mut SensorData, frame: &Frame<'_>) -> bool {
    match data.apply_frame(frame.bytes) {
        Some(mode) => {
            trace!("Report decoded ({})", mode);
            true
        }
        None => {
            debug!("Ignoring unrecognized report sub-frame");
            false
        }
    }
}

/// Judge the first command frame received during an exchange
fn check_ack<E>(frame: &Frame<'_>, command: &Command) -> core::result::Result<(), Error<E>> {
    let Some(ack) = Ack::parse(frame) else {
        warn!("Malformed acknowledgement");
        return Err(Error::InvalidAck);
    };

    let expected = command.expected_ack();
    if !ack.acknowledges(command) {
        warn!("Expected ack {:#x}, received {:#x}", expected, ack.code);
        return Err(Error::UnexpectedAck {
            expected,
            received: ack.code,
        });
    }

    if !ack.is_success() {
        warn!("Command {:#x} rejected with status {}", expected, ack.status);
        return Err(Error::Rejected { status: ack.status });
    }

    trace!("Ack {:#x} with {} trailing bytes", ack.code, ack.data.len());
    Ok(())
}
