//! Hardware configuration types
//!
//! These types define the board-level wiring of the motor driver and the
//! encoder.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }

    /// Logic level to drive for an active (`true`) or inactive state
    pub const fn level(&self, active: bool) -> bool {
        active != self.inverted
    }
}

/// Which quadrature edges advance the count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuadratureMode {
    /// Every edge on A and B (4 counts per cycle)
    Full,
    /// Every edge on A (2 counts per cycle)
    #[default]
    Half,
    /// Rising edges on A (1 count per cycle)
    Single,
}

impl QuadratureMode {
    /// Counts produced per full quadrature cycle
    pub const fn counts_per_cycle(&self) -> u8 {
        match self {
            QuadratureMode::Full => 4,
            QuadratureMode::Half => 2,
            QuadratureMode::Single => 1,
        }
    }
}

/// Motor driver and encoder wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// H-bridge direction input 1 (high for forward)
    pub motor_in1: PinConfig,
    /// H-bridge direction input 2 (high for reverse)
    pub motor_in2: PinConfig,
    /// Encoder channel A
    pub encoder_a: PinConfig,
    /// Encoder channel B
    pub encoder_b: PinConfig,
    /// Encoder counting mode
    pub quadrature: QuadratureMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            motor_in1: PinConfig::new(17),
            motor_in2: PinConfig::new(18),
            encoder_a: PinConfig::with_pullup(20),
            encoder_b: PinConfig::with_pullup(21),
            quadrature: QuadratureMode::Half,
        }
    }
}

impl BoardConfig {
    /// All configured pins, in declaration order
    pub fn pins(&self) -> [PinConfig; 4] {
        [self.motor_in1, self.motor_in2, self.encoder_a, self.encoder_b]
    }

    /// First GPIO number assigned more than once, if any
    pub fn first_conflict(&self) -> Option<u8> {
        let pins = self.pins();
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Some(a.pin);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_config() {
        let pin = PinConfig::new(17);
        assert_eq!(pin.pin, 17);
        assert!(!pin.inverted);
        assert!(pin.level(true));

        let pin = PinConfig::inverted(12);
        assert!(pin.inverted);
        assert!(!pin.level(true));
        assert!(pin.level(false));

        let pin = PinConfig::with_pullup(4);
        assert!(pin.pull_up);
    }

    #[test]
    fn test_default_board_has_no_conflicts() {
        assert_eq!(BoardConfig::default().first_conflict(), None);
    }

    #[test]
    fn test_pin_conflict_detected() {
        let board = BoardConfig {
            encoder_b: PinConfig::new(17),
            ..Default::default()
        };
        assert_eq!(board.first_conflict(), Some(17));
    }

    #[test]
    fn test_counts_per_cycle() {
        assert_eq!(QuadratureMode::Full.counts_per_cycle(), 4);
        assert_eq!(QuadratureMode::Half.counts_per_cycle(), 2);
        assert_eq!(QuadratureMode::Single.counts_per_cycle(), 1);
    }
}
