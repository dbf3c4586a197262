//! Encoder displacement tracker
//!
//! Wraps an [`EncoderCounter`] and produces the signed displacement since
//! the previous read. The polarity is fixed at construction and applied to
//! the startup baseline and to every later reading alike.
//!
//! Deltas use wrapping subtraction. For a counter that spans the full `i64`
//! range this yields the true displacement even across a wrap; a narrower
//! hardware counter must be widened by its driver before it gets here.

use crate::traits::EncoderCounter;

/// Encoder count direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    /// Raw count is used as is
    #[default]
    Normal,
    /// Raw count is negated before use
    Reversed,
}

impl Polarity {
    /// Polarity from a "reverse" configuration flag
    pub const fn from_reversed(reversed: bool) -> Self {
        if reversed {
            Polarity::Reversed
        } else {
            Polarity::Normal
        }
    }

    /// Apply this polarity to a raw count
    #[inline]
    pub const fn apply(self, raw: i64) -> i64 {
        match self {
            Polarity::Normal => raw,
            Polarity::Reversed => raw.wrapping_neg(),
        }
    }
}

/// Per-tick displacement tracker
#[derive(Debug)]
pub struct EncoderTracker<C> {
    counter: C,
    polarity: Polarity,
    /// Last polarity-adjusted reading
    previous: i64,
}

impl<C: EncoderCounter> EncoderTracker<C> {
    /// Create a tracker, clearing the counter and seeding the baseline
    pub fn new(mut counter: C, polarity: Polarity) -> Self {
        counter.clear();
        let previous = polarity.apply(counter.count());
        Self {
            counter,
            polarity,
            previous,
        }
    }

    /// Read the displacement since the previous call
    ///
    /// Must be called once per control tick; calling it more often splits
    /// the same motion across several deltas.
    pub fn read_delta(&mut self) -> i64 {
        let current = self.polarity.apply(self.counter.count());
        let delta = current.wrapping_sub(self.previous);
        self.previous = current;
        delta
    }

    /// Polarity-adjusted position at the last read
    pub fn position(&self) -> i64 {
        self.previous
    }
}
