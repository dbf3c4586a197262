//! GPIO numbering and pin strings
//!
//! Pin strings in the config file follow the Klipper convention:
//! - `"gpio17"`: plain output or input
//! - `"!gpio17"`: inverted (active-low)
//! - `"^gpio20"`: input with pull-up
//!
//! Modifiers can be combined (`"^!gpio20"`).

use ergon_core::config::{BoardConfig, PinConfig};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins claimed by fixed peripherals: UART0 TX/RX and the PWM slice 0 A output
pub const RESERVED_PINS: [u8; 3] = [0, 1, 16];

/// Pin assignment errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for a fixed peripheral
    Reserved,
    /// Pin string is not of the form `[!^]gpioNN`
    Malformed,
}

/// Parse a pin string like "gpio17", "!gpio17" or "^gpio20"
pub fn parse_pin(s: &str) -> Result<PinConfig, PinError> {
    let mut s = s.trim();
    let mut config = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            config.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            config.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num = s.strip_prefix("gpio").ok_or(PinError::Malformed)?;
    config.pin = num.parse().map_err(|_| PinError::Malformed)?;
    if config.pin >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    Ok(config)
}

/// Check that a pin can be handed out by the pin bank
pub fn check_pin(pin: u8) -> Result<(), PinError> {
    if pin >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    if RESERVED_PINS.contains(&pin) {
        return Err(PinError::Reserved);
    }
    Ok(())
}

/// Check every pin of a board configuration
///
/// Returns the first offending pin with its error.
pub fn check_board(board: &BoardConfig) -> Result<(), (u8, PinError)> {
    for pin in board.pins() {
        check_pin(pin.pin).map_err(|e| (pin.pin, e))?;
    }
    if let Some(pin) = board.first_conflict() {
        return Err((pin, PinError::AlreadyTaken));
    }
    Ok(())
}
