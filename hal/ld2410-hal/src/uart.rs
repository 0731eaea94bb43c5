//! UART serial communication abstractions
//!
//! The LD2410 streams report frames continuously, so the receive side is
//! strictly non-blocking: the driver asks what is there and takes it,
//! it never waits for a byte that may not come.

use core::fmt::Debug;

/// Shared error type for both halves of a UART
pub trait ErrorType {
    /// Error type for transport operations
    type Error: Debug;
}

/// UART transmitter
pub trait UartTx: ErrorType {
    /// Write data to the UART
    ///
    /// Blocks until all data has been handed to the peripheral or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    ///
    /// Returns once every byte written so far has left the transmitter.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx: ErrorType {
    /// Check whether at least one received byte is waiting
    fn bytes_available(&mut self) -> Result<bool, Self::Error>;

    /// Take one received byte without blocking
    ///
    /// Returns `Ok(None)` when nothing is waiting.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Drain up to `buf.len()` waiting bytes without blocking
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut count = 0;
        while count < buf.len() {
            match self.read_byte()? {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }
}

/// UART whose line settings can be changed at runtime
pub trait ConfigurableUart: ErrorType {
    /// Apply baud rate and framing
    fn apply_config(&mut self, config: &UartConfig) -> Result<(), Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// Baud rate outside the set the LD2410 supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedBaud(pub u32);

/// Baud rates supported by the LD2410
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudRate {
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
    B230400,
    /// Factory default
    B256000,
    B460800,
}

impl BaudRate {
    /// Every supported rate, slowest first
    pub const ALL: [BaudRate; 8] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
        BaudRate::B230400,
        BaudRate::B256000,
        BaudRate::B460800,
    ];

    /// Bits per second
    pub const fn as_u32(self) -> u32 {
        match self {
            BaudRate::B9600 => 9_600,
            BaudRate::B19200 => 19_200,
            BaudRate::B38400 => 38_400,
            BaudRate::B57600 => 57_600,
            BaudRate::B115200 => 115_200,
            BaudRate::B230400 => 230_400,
            BaudRate::B256000 => 256_000,
            BaudRate::B460800 => 460_800,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::B256000
    }
}

impl TryFrom<u32> for BaudRate {
    type Error = UnsupportedBaud;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        BaudRate::ALL
            .iter()
            .copied()
            .find(|rate| rate.as_u32() == value)
            .ok_or(UnsupportedBaud(value))
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate
    pub baudrate: BaudRate,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given rate, as the LD2410 expects
    pub const fn new(baudrate: BaudRate) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::new(BaudRate::default())
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Adapter for any `embedded-io` serial peripheral
///
/// Most chip HALs (and host serial crates) implement the `embedded-io`
/// traits. Their line settings are fixed when the peripheral is built, so
/// [`ConfigurableUart::apply_config`] only records the requested settings.
pub struct IoUart<T> {
    inner: T,
    config: UartConfig,
}

impl<T> IoUart<T> {
    /// Wrap a peripheral that was already configured for `config`
    pub fn new(inner: T, config: UartConfig) -> Self {
        Self { inner, config }
    }

    /// Settings last requested through [`ConfigurableUart`]
    pub fn config(&self) -> &UartConfig {
        &self.config
    }

    /// Release the wrapped peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_io::ErrorType> ErrorType for IoUart<T> {
    type Error = T::Error;
}

impl<T: embedded_io::Write> UartTx for IoUart<T> {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

impl<T: embedded_io::Read + embedded_io::ReadReady> UartRx for IoUart<T> {
    fn bytes_available(&mut self) -> Result<bool, Self::Error> {
        self.inner.read_ready()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.inner.read_ready()? {
            return Ok(None);
        }
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

impl<T: embedded_io::ErrorType> ConfigurableUart for IoUart<T> {
    fn apply_config(&mut self, config: &UartConfig) -> Result<(), Self::Error> {
        self.config = *config;
        Ok(())
    }
}
