//! Non-blocking byte source
//!
//! Command bytes are pulled, never awaited: the control loop must keep
//! ticking whether or not the operator is typing.

use heapless::Deque;

/// Source of received bytes that never blocks
pub trait ByteSource {
    /// Take the next byte if one is ready
    fn try_read_byte(&mut self) -> Option<u8>;
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn try_read_byte(&mut self) -> Option<u8> {
        (**self).try_read_byte()
    }
}

impl<const N: usize> ByteSource for Deque<u8, N> {
    fn try_read_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}
