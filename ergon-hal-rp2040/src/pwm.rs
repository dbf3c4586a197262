//! PWM slice output
//!
//! Wraps an Embassy PWM slice driving channel A and exposes it through
//! `embedded_hal::pwm::SetDutyCycle`, so the H-bridge driver stays
//! board-agnostic. The duty range is `0..=top + 1`, so full scale holds the
//! output high for the whole period.

use core::convert::Infallible;

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use fixed::types::extra::U4;
use fixed::FixedU16;

use ergon_drivers::motor::{full_scale, pwm_timing, PwmTiming, TimingError};

/// Build a slice configuration for the given timing, output off
pub fn slice_config(timing: &PwmTiming) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = timing.top;
    config.divider = FixedU16::<U4>::from_bits(timing.divider_x16);
    config.compare_a = 0;
    config
}

/// Slice configuration for a carrier frequency at the current system clock
pub fn carrier_config(freq_hz: u32) -> Result<(PwmTiming, PwmConfig), TimingError> {
    let timing = pwm_timing(embassy_rp::clocks::clk_sys_freq(), freq_hz)?;
    Ok((timing, slice_config(&timing)))
}

/// Channel A of a PWM slice
pub struct PwmChannelA {
    pwm: Pwm<'static>,
    config: PwmConfig,
}

impl PwmChannelA {
    /// Take over a slice and apply its configuration
    pub fn new(mut pwm: Pwm<'static>, config: PwmConfig) -> Self {
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl ErrorType for PwmChannelA {
    type Error = Infallible;
}

impl SetDutyCycle for PwmChannelA {
    fn max_duty_cycle(&self) -> u16 {
        full_scale(self.config.top)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        if duty != self.config.compare_a {
            self.config.compare_a = duty;
            self.pwm.set_config(&self.config);
        }
        Ok(())
    }
}
