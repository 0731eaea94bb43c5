//! Clock abstraction
//!
//! Blocking delays come from `embedded_hal::delay::DelayNs`; this module
//! only adds the missing "what time is it" half so deadlines can be checked
//! against a clock that never jumps.

/// Monotonic millisecond clock
///
/// The epoch is arbitrary (typically boot). Values must never decrease,
/// which rules out wall-clock sources that can be adjusted.
pub trait Monotonic {
    /// Milliseconds elapsed since the clock's epoch
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `since`, saturating at zero
    fn elapsed_ms(&self, since: u64) -> u64 {
        self.now_ms().saturating_sub(since)
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
