//! Encoder counter trait
//!
//! The quadrature decoding itself happens elsewhere (a peripheral, a PIO
//! program or an edge-driven task). The control logic only sees a signed
//! running count.

/// A signed quadrature tick counter
pub trait EncoderCounter {
    /// Read the current raw count
    fn count(&self) -> i64;

    /// Reset the count to zero
    fn clear(&mut self);
}

impl<T: EncoderCounter + ?Sized> EncoderCounter for &mut T {
    fn count(&self) -> i64 {
        (**self).count()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}
