//! GPIO pin abstractions
//!
//! The LD2410 drives an OUT pin high while presence is detected. These
//! traits cover what is needed to observe it: reading the level and
//! getting an interrupt on every transition.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Input pin that can raise an interrupt on level transitions
///
/// The interrupt handler itself is registered by the board support code;
/// this trait only arms and acknowledges the pin's interrupt source.
pub trait EdgeInterrupt {
    /// Arm the interrupt for both rising and falling edges
    fn listen_any_edge(&mut self);

    /// Disarm the interrupt
    fn unlisten(&mut self);

    /// Acknowledge a pending interrupt
    ///
    /// Must be called from the handler, otherwise the interrupt
    /// fires again immediately on most chips.
    fn clear_interrupt(&mut self);
}

/// Pin usable for output observation
pub trait ObservablePin: InputPin + EdgeInterrupt {}

// Blanket implementation
impl<T: InputPin + EdgeInterrupt> ObservablePin for T {}
