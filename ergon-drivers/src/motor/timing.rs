//! PWM carrier timing
//!
//! Counter-based PWM slices run at `clock / divider` and wrap after
//! `top + 1` counts. The divider is an 8.4 fixed-point value
//! (1.0 to 255.9375), as on the RP2040. For a target frequency we pick the
//! smallest divider that keeps `top` within 16 bits, which maximizes duty
//! resolution.

/// Smallest divider (1.0) in sixteenths
const DIV_MIN_X16: u64 = 16;
/// Largest divider (255 + 15/16) in sixteenths
const DIV_MAX_X16: u64 = 4095;
/// Counter wraps after `top + 1` counts
const MAX_PERIOD: u64 = 1 << 16;

/// Computed PWM slice timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Counter wrap value
    pub top: u16,
    /// Clock divider in sixteenths (8.4 fixed point)
    pub divider_x16: u16,
}

impl PwmTiming {
    /// Integer part of the divider
    pub const fn divider_int(&self) -> u8 {
        (self.divider_x16 >> 4) as u8
    }

    /// Fractional part of the divider, in sixteenths
    pub const fn divider_frac(&self) -> u8 {
        (self.divider_x16 & 0x0F) as u8
    }

    /// Carrier frequency actually produced from `clock_hz`
    pub fn frequency_hz(&self, clock_hz: u32) -> u32 {
        let period_x16 = self.divider_x16 as u64 * (self.top as u64 + 1);
        (clock_hz as u64 * 16 / period_x16) as u32
    }
}

/// Compare value for a fully-on output
///
/// The output is high while the counter is below the compare value, so a
/// compare of `top` still drops low for one count. `top + 1` keeps it high
/// for the whole period. At `top == u16::MAX` one count is always lost.
pub const fn full_scale(top: u16) -> u16 {
    top.saturating_add(1)
}

/// PWM timing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Requested frequency is zero
    ZeroFrequency,
    /// Frequency too high for at least two counter steps
    TooHigh,
    /// Frequency too low even at the largest divider
    TooLow,
}

/// Compute the PWM slice timing for a carrier frequency
pub fn pwm_timing(clock_hz: u32, freq_hz: u32) -> Result<PwmTiming, TimingError> {
    if freq_hz == 0 {
        return Err(TimingError::ZeroFrequency);
    }

    let cycles_x16 = clock_hz as u64 * 16 / freq_hz as u64;
    let divider_x16 = cycles_x16.div_ceil(MAX_PERIOD).max(DIV_MIN_X16);
    if divider_x16 > DIV_MAX_X16 {
        return Err(TimingError::TooLow);
    }

    let period = cycles_x16 / divider_x16;
    if period < 2 {
        return Err(TimingError::TooHigh);
    }

    Ok(PwmTiming {
        top: (period - 1) as u16,
        divider_x16: divider_x16 as u16,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SYS_CLK: u32 = 125_000_000;

    #[test]
    fn test_default_carrier() {
        let timing = pwm_timing(SYS_CLK, 5_000).unwrap();
        assert_eq!(timing.divider_x16, 16);
        assert_eq!(timing.divider_int(), 1);
        assert_eq!(timing.divider_frac(), 0);
        assert_eq!(timing.top, 24_999);
        assert_eq!(timing.frequency_hz(SYS_CLK), 5_000);
    }

    #[test]
    fn test_low_frequency_uses_divider() {
        let timing = pwm_timing(SYS_CLK, 100).unwrap();
        assert!(timing.divider_x16 > 16);
        let f = timing.frequency_hz(SYS_CLK);
        assert!((99..=101).contains(&f));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(pwm_timing(SYS_CLK, 0), Err(TimingError::ZeroFrequency));
        assert_eq!(pwm_timing(SYS_CLK, 1), Err(TimingError::TooLow));
        assert_eq!(pwm_timing(SYS_CLK, 100_000_000), Err(TimingError::TooHigh));
    }

    #[test]
    fn test_full_scale_covers_whole_period() {
        assert_eq!(full_scale(24_999), 25_000);
        assert_eq!(full_scale(0), 1);
        assert_eq!(full_scale(u16::MAX), u16::MAX);
    }

    proptest! {
        #[test]
        fn prop_achieved_frequency_close(freq in 10u32..1_000_000) {
            let timing = pwm_timing(SYS_CLK, freq).unwrap();
            let achieved = timing.frequency_hz(SYS_CLK) as i64;
            // Within 1% or 1 Hz
            let tolerance = (freq as i64 / 100).max(1);
            prop_assert!((achieved - freq as i64).abs() <= tolerance);
        }
    }
}
