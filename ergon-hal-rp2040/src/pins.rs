//! Dynamic pin allocation for config-driven hardware setup
//!
//! Holds the GPIO pins that are not claimed by fixed peripherals so the
//! firmware can take them by the numbers found in its config file.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

use crate::gpio::{check_pin, PinError, GPIO_COUNT};

/// Build a [`PinBank`] from named peripheral pins
///
/// Usage:
/// ```ignore
/// let mut pins = pin_bank!(p; 2 => PIN_2, 3 => PIN_3, 17 => PIN_17);
/// let in1 = pins.take(17)?;
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:expr; $($n:literal => $pin:ident),* $(,)?) => {{
        let mut bank = $crate::pins::PinBank::empty();
        $(
            bank.insert($n, embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.$pin));
        )*
        bank
    }};
}

/// Pin bank that allows taking GPIO pins by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Create an empty pin bank
    pub const fn empty() -> Self {
        Self {
            pins: [const { None }; GPIO_COUNT as usize],
        }
    }

    /// Put a pin into the bank
    ///
    /// Out-of-range numbers and reserved pins are ignored.
    pub fn insert(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        if check_pin(pin_num).is_ok() {
            self.pins[pin_num as usize] = Some(pin);
        }
    }

    /// Take a pin by number
    ///
    /// Returns an error if the number is out of range, the pin is reserved
    /// for a fixed peripheral, or it was already taken.
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        check_pin(pin_num)?;
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}
