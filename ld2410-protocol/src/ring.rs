//! Byte ring buffer between the UART and the frame synchronizer
//!
//! The sensor streams reports whether anyone reads them or not, so the
//! buffer never pushes back: when it is full the oldest unread byte is
//! overwritten.

/// Default storage size for received bytes
pub const RX_BUFFER_SIZE: usize = 256;

/// Fixed-capacity circular byte store
///
/// One slot is kept free to tell "full" from "empty", so a buffer with
/// `N` bytes of storage holds at most `N - 1` unread bytes.
#[derive(Debug, Clone)]
pub struct RingBuffer<const N: usize = RX_BUFFER_SIZE> {
    storage: [u8; N],
    /// Next write position
    head: usize,
    /// Next read position
    tail: usize,
    /// Bytes lost to overwrites since creation
    dropped: u32,
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        assert!(N >= 2, "ring buffer needs at least two slots");
        Self {
            storage: [0; N],
            head: 0,
            tail: 0,
            dropped: 0,
        }
    }

    /// Store a byte, discarding the oldest unread byte if full
    pub fn push(&mut self, byte: u8) {
        self.storage[self.head] = byte;
        self.head = (self.head + 1) % N;

        if self.head == self.tail {
            self.tail = (self.tail + 1) % N;
            self.dropped = self.dropped.wrapping_add(1);
        }
    }

    /// Store every byte of `bytes` in order
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Take the oldest unread byte
    pub fn pop(&mut self) -> Option<u8> {
        if self.head == self.tail {
            return None;
        }
        let byte = self.storage[self.tail];
        self.tail = (self.tail + 1) % N;
        Some(byte)
    }

    /// Number of unread bytes
    pub fn len(&self) -> usize {
        (self.head + N - self.tail) % N
    }

    /// Check if there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Check if the next push will overwrite unread data
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Maximum number of unread bytes the buffer can hold
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Bytes lost to overwrites since creation (wraps)
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard all unread bytes
    pub fn clear(&mut self) {
        self.tail = self.head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut ring: RingBuffer<8> = RingBuffer::new();
        assert!(ring.is_empty());
        assert_eq!(ring.pop(), None);

        ring.extend_from_slice(&[1, 2, 3]);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.pop(), Some(1));
        assert_eq!(ring.pop(), Some(2));
        assert_eq!(ring.pop(), Some(3));
        assert_eq!(ring.pop(), None);
        assert_eq!(ring.dropped(), 0);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut ring: RingBuffer<5> = RingBuffer::new();

        for i in 0..10u8 {
            ring.push(i);
        }

        // Only capacity (N - 1) bytes survive, newest ones
        assert_eq!(ring.len(), 4);
        assert!(ring.is_full());
        assert_eq!(ring.dropped(), 6);
        assert_eq!(ring.pop(), Some(6));
        assert_eq!(ring.pop(), Some(7));
        assert_eq!(ring.pop(), Some(8));
        assert_eq!(ring.pop(), Some(9));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_wraparound_indices() {
        let mut ring: RingBuffer<4> = RingBuffer::new();

        for round in 0..20u8 {
            ring.push(round);
            ring.push(round.wrapping_add(100));
            assert_eq!(ring.pop(), Some(round));
            assert_eq!(ring.pop(), Some(round.wrapping_add(100)));
            assert!(ring.is_empty());
        }
        assert_eq!(ring.dropped(), 0);
    }

    #[test]
    fn test_clear() {
        let mut ring: RingBuffer<16> = RingBuffer::new();
        ring.extend_from_slice(&[0xF4, 0xF3, 0xF2]);
        ring.clear();
        assert!(ring.is_empty());
        ring.push(0xAA);
        assert_eq!(ring.pop(), Some(0xAA));
    }
}
