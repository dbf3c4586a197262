//! Software quadrature decoder
//!
//! Decodes A/B channel levels into signed steps. Forward rotation is A
//! leading B:
//!
//! ```text
//! A: _|‾‾‾|___|‾‾‾|_
//! B: ___|‾‾‾|___|‾‾‾
//!    (A,B): 00 -> 10 -> 11 -> 01 -> 00
//! ```
//!
//! Counting depends on [`QuadratureMode`]:
//! - `Full`: every edge on A or B, 4 steps per cycle. A transition where
//!   both channels changed at once is invalid (a missed edge) and is
//!   dropped.
//! - `Half`: every edge on A, direction taken from B, 2 steps per cycle.
//! - `Single`: rising edges on A only, 1 step per cycle.

use ergon_core::config::QuadratureMode;

/// Quadrature state as a 2-bit code: `(A << 1) | B`
const fn code(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

/// Step for each `(previous << 2) | current` transition in full mode
const FULL_STEP: [i8; 16] = [
    // prev 00: 00, 01, 10, 11
    0, -1, 1, 0, //
    // prev 01
    1, 0, 0, -1, //
    // prev 10
    -1, 0, 0, 1, //
    // prev 11
    0, 1, -1, 0,
];

/// Quadrature decoder state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    mode: QuadratureMode,
    last_a: bool,
    last_b: bool,
    /// Transitions dropped because both channels changed at once
    invalid: u32,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current channel levels
    pub const fn new(mode: QuadratureMode, a: bool, b: bool) -> Self {
        Self {
            mode,
            last_a: a,
            last_b: b,
            invalid: 0,
        }
    }

    /// Feed new channel levels and return the step they produce
    ///
    /// Returns -1, 0 or 1. Calling with unchanged levels is a no-op.
    pub fn update(&mut self, a: bool, b: bool) -> i8 {
        let a_changed = a != self.last_a;
        let b_changed = b != self.last_b;

        let step = match self.mode {
            QuadratureMode::Full => {
                if a_changed && b_changed {
                    self.invalid = self.invalid.saturating_add(1);
                    0
                } else {
                    let index = (code(self.last_a, self.last_b) << 2) | code(a, b);
                    FULL_STEP[index as usize]
                }
            }
            QuadratureMode::Half => {
                if a_changed {
                    if a != b {
                        1
                    } else {
                        -1
                    }
                } else {
                    0
                }
            }
            QuadratureMode::Single => {
                if a_changed && a {
                    if b {
                        -1
                    } else {
                        1
                    }
                } else {
                    0
                }
            }
        };

        self.last_a = a;
        self.last_b = b;
        step
    }

    /// Counting mode
    pub fn mode(&self) -> QuadratureMode {
        self.mode
    }

    /// Number of invalid transitions seen (full mode only)
    pub fn invalid_transitions(&self) -> u32 {
        self.invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// One forward cycle starting from 00
    const FORWARD: [(bool, bool); 4] = [(true, false), (true, true), (false, true), (false, false)];
    /// One reverse cycle starting from 00
    const REVERSE: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn run(decoder: &mut QuadratureDecoder, seq: &[(bool, bool)]) -> i32 {
        seq.iter().map(|&(a, b)| decoder.update(a, b) as i32).sum()
    }

    #[test]
    fn test_full_counts_every_edge() {
        let mut d = QuadratureDecoder::new(QuadratureMode::Full, false, false);
        assert_eq!(run(&mut d, &FORWARD), 4);
        assert_eq!(run(&mut d, &REVERSE), -4);
    }

    #[test]
    fn test_half_counts_a_edges() {
        let mut d = QuadratureDecoder::new(QuadratureMode::Half, false, false);
        assert_eq!(run(&mut d, &FORWARD), 2);
        assert_eq!(run(&mut d, &REVERSE), -2);
    }

    #[test]
    fn test_single_counts_a_rising() {
        let mut d = QuadratureDecoder::new(QuadratureMode::Single, false, false);
        assert_eq!(run(&mut d, &FORWARD), 1);
        assert_eq!(run(&mut d, &REVERSE), -1);
    }

    #[test]
    fn test_full_ignores_double_transition() {
        let mut d = QuadratureDecoder::new(QuadratureMode::Full, false, false);
        assert_eq!(d.update(true, true), 0);
        assert_eq!(d.invalid_transitions(), 1);

        // Decoding resumes from the new state
        assert_eq!(d.update(false, true), 1);
    }

    #[test]
    fn test_unchanged_levels_are_noop() {
        for mode in [QuadratureMode::Full, QuadratureMode::Half, QuadratureMode::Single] {
            let mut d = QuadratureDecoder::new(mode, true, false);
            assert_eq!(d.update(true, false), 0);
        }
    }

    #[test]
    fn test_direction_reversal_mid_cycle() {
        let mut d = QuadratureDecoder::new(QuadratureMode::Full, false, false);
        assert_eq!(d.update(true, false), 1);
        assert_eq!(d.update(false, false), -1);
    }

    proptest! {
        #[test]
        fn prop_forward_then_reverse_returns_to_zero(
            cycles in 0usize..20,
            mode in prop_oneof![
                Just(QuadratureMode::Full),
                Just(QuadratureMode::Half),
                Just(QuadratureMode::Single),
            ],
        ) {
            let mut d = QuadratureDecoder::new(mode, false, false);
            let mut total = 0;
            for _ in 0..cycles {
                total += run(&mut d, &FORWARD);
            }
            prop_assert_eq!(total, cycles as i32 * mode.counts_per_cycle() as i32);
            for _ in 0..cycles {
                total += run(&mut d, &REVERSE);
            }
            prop_assert_eq!(total, 0);
        }
    }
}
