//! Controller configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::BoardConfig;
use crate::motion::Polarity;

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Control loop timing and encoder direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Negate the raw encoder count before use
    pub reverse_encoder: bool,
    /// Control tick interval in ms
    pub tick_interval_ms: u32,
    /// Minimum time between status snapshots in ms
    pub status_interval_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            reverse_encoder: true,
            tick_interval_ms: 10,
            status_interval_ms: 1000,
        }
    }
}

impl ControlConfig {
    /// Encoder polarity implied by `reverse_encoder`
    pub const fn polarity(&self) -> Polarity {
        Polarity::from_reversed(self.reverse_encoder)
    }
}

/// Motor output configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Full-scale duty value; larger drive magnitudes are clamped to this
    pub max_duty: u16,
    /// PWM carrier frequency in Hz
    pub pwm_frequency_hz: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            max_duty: 255,
            pwm_frequency_hz: 5000,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Config version does not match [`CONFIG_VERSION`]
    VersionMismatch,
    /// Tick interval is zero
    InvalidTickInterval,
    /// Status interval is shorter than one tick
    InvalidStatusInterval,
    /// Maximum duty is zero
    InvalidMaxDuty,
    /// PWM frequency is zero or above 1 MHz
    InvalidPwmFrequency,
    /// The same GPIO is assigned twice
    PinConflict(u8),
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Control loop settings
    pub control: ControlConfig,
    /// Motor output settings
    pub motor: MotorConfig,
    /// Board pin assignments
    pub board: BoardConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            control: ControlConfig::default(),
            motor: MotorConfig::default(),
            board: BoardConfig::default(),
        }
    }
}

impl ControllerConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check value ranges and pin assignments
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if self.control.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        if self.control.status_interval_ms < self.control.tick_interval_ms {
            return Err(ConfigError::InvalidStatusInterval);
        }
        if self.motor.max_duty == 0 {
            return Err(ConfigError::InvalidMaxDuty);
        }
        if self.motor.pwm_frequency_hz == 0 || self.motor.pwm_frequency_hz > 1_000_000 {
            return Err(ConfigError::InvalidPwmFrequency);
        }
        if let Some(pin) = self.board.first_conflict() {
            return Err(ConfigError::PinConflict(pin));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ControllerConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.control.polarity(), Polarity::Reversed);
        assert_eq!(config.motor.max_duty, 255);
    }

    #[test]
    fn test_zero_tick_interval_rejected() {
        let mut config = ControllerConfig::new();
        config.control.tick_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTickInterval));
    }

    #[test]
    fn test_status_faster_than_tick_rejected() {
        let mut config = ControllerConfig::new();
        config.control.tick_interval_ms = 20;
        config.control.status_interval_ms = 10;
        assert_eq!(config.validate(), Err(ConfigError::InvalidStatusInterval));
    }

    #[test]
    fn test_motor_limits() {
        let mut config = ControllerConfig::new();
        config.motor.max_duty = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxDuty));

        let mut config = ControllerConfig::new();
        config.motor.pwm_frequency_hz = 2_000_000;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPwmFrequency));
    }

    #[test]
    fn test_version_mismatch() {
        let mut config = ControllerConfig::new();
        config.version = 9;
        assert_eq!(config.validate(), Err(ConfigError::VersionMismatch));
    }
}
