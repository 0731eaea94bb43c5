//! OUT pin observation
//!
//! The LD2410 raises its OUT pin while a target is present. Watching it
//! needs no UART traffic at all, only an edge interrupt. The observer is a
//! caller-owned context handle: the board's interrupt handler passes it the
//! pin, and it touches nothing but its own atomic level and callback, so it
//! is safe to run in the middle of [`crate::Ld2410::poll`].
//!
//! ```ignore
//! static OUT: OutputObserver = OutputObserver::new(on_presence);
//!
//! fn on_presence(present: bool) { /* ... */ }
//!
//! // setup
//! OUT.begin(&mut out_pin);
//!
//! // in the GPIO interrupt handler
//! OUT.on_edge(&mut out_pin);
//! ```

use ld2410_hal::ObservablePin;
use portable_atomic::{AtomicBool, Ordering};

/// Edge-driven view of the OUT pin
pub struct OutputObserver {
    level: AtomicBool,
    listening: AtomicBool,
    callback: fn(bool),
}

impl OutputObserver {
    /// Create an observer that reports every level change to `callback`
    pub const fn new(callback: fn(bool)) -> Self {
        Self {
            level: AtomicBool::new(false),
            listening: AtomicBool::new(false),
            callback,
        }
    }

    /// Arm the pin's edge interrupt and sample the current level
    ///
    /// The level is sampled after arming, so an edge that lands in between
    /// is either delivered through [`OutputObserver::on_edge`] or seen here.
    pub fn begin<P: ObservablePin>(&self, pin: &mut P) {
        self.listening.store(true, Ordering::Release);
        pin.listen_any_edge();
        self.level.store(pin.is_high(), Ordering::Release);
    }

    /// Interrupt entry point
    ///
    /// Acknowledges the interrupt, latches the new level and invokes the
    /// callback with it. Edges arriving after [`OutputObserver::stop`]
    /// are acknowledged and otherwise ignored.
    pub fn on_edge<P: ObservablePin>(&self, pin: &mut P) {
        pin.clear_interrupt();
        if !self.listening.load(Ordering::Acquire) {
            return;
        }
        let level = pin.is_high();
        self.level.store(level, Ordering::Release);
        (self.callback)(level);
    }

    /// Disarm the pin's edge interrupt
    pub fn stop<P: ObservablePin>(&self, pin: &mut P) {
        self.listening.store(false, Ordering::Release);
        pin.unlisten();
    }

    /// Last latched level (`true` = target present)
    pub fn level(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    /// Check if edges are being reported
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }
}
