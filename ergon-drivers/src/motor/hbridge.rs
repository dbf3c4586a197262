//! H-bridge DC motor driver
//!
//! Drives a brushed DC motor through a dual-input H-bridge (TB6612,
//! DRV8833 and similar):
//! - IN1 high, IN2 low: forward
//! - IN1 low, IN2 high: reverse
//! - PWM channel sets the magnitude
//!
//! Drive magnitudes are clamped to `max_duty` and then scaled onto the
//! full range of the PWM channel, so an 8-bit style magnitude (0-255)
//! works regardless of the PWM counter resolution.
//!
//! # Usage
//!
//! ```ignore
//! let mut motor = HBridgeMotor::new(in1, in2, pwm, HBridgeConfig::from_config(&motor, &board));
//! motor.apply(Drive::forward(128));
//! ```

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use ergon_core::config::{BoardConfig, MotorConfig, PinConfig};
use ergon_core::traits::{Drive, MotorOutput};

/// H-bridge driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HBridgeConfig {
    /// Magnitude that maps to 100% duty; larger values are clamped
    pub max_duty: u16,
    /// IN1 wiring (active level)
    pub in1: PinConfig,
    /// IN2 wiring (active level)
    pub in2: PinConfig,
}

impl Default for HBridgeConfig {
    fn default() -> Self {
        Self::from_config(&MotorConfig::default(), &BoardConfig::default())
    }
}

impl HBridgeConfig {
    /// Build from the controller's motor and board configuration
    pub fn from_config(motor: &MotorConfig, board: &BoardConfig) -> Self {
        Self {
            max_duty: motor.max_duty,
            in1: board.motor_in1,
            in2: board.motor_in2,
        }
    }
}

/// Output fault while applying a drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HBridgeError {
    /// A direction pin could not be set
    Direction,
    /// The PWM channel rejected the duty value
    Pwm,
}

/// Scale a clamped magnitude onto a PWM channel's duty range
///
/// Returns 0 when `max_duty` is 0.
pub const fn scale_duty(magnitude: u32, max_duty: u16, channel_max: u16) -> u16 {
    if max_duty == 0 {
        return 0;
    }
    let clamped = if magnitude > max_duty as u32 {
        max_duty as u32
    } else {
        magnitude
    };
    (clamped * channel_max as u32 / max_duty as u32) as u16
}

/// H-bridge motor driver
pub struct HBridgeMotor<IN1, IN2, PWM> {
    in1: IN1,
    in2: IN2,
    pwm: PWM,
    config: HBridgeConfig,
    /// Last drive requested
    last: Drive,
    /// Duty value written at the last apply
    duty: u16,
    /// Number of applies that hit an output error
    faults: u32,
}

impl<IN1, IN2, PWM> HBridgeMotor<IN1, IN2, PWM>
where
    IN1: OutputPin,
    IN2: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create a new H-bridge driver
    ///
    /// Outputs are left untouched until the first [`MotorOutput::apply`].
    pub fn new(in1: IN1, in2: IN2, pwm: PWM, config: HBridgeConfig) -> Self {
        Self {
            in1,
            in2,
            pwm,
            config,
            last: Drive::STOP,
            duty: 0,
            faults: 0,
        }
    }

    /// Set direction pins and duty for a drive
    pub fn try_apply(&mut self, drive: Drive) -> Result<(), HBridgeError> {
        self.last = drive;

        let in1 = PinState::from(self.config.in1.level(drive.forward));
        let in2 = PinState::from(self.config.in2.level(!drive.forward));
        self.in1
            .set_state(in1)
            .map_err(|_| HBridgeError::Direction)?;
        self.in2
            .set_state(in2)
            .map_err(|_| HBridgeError::Direction)?;

        let duty = scale_duty(
            drive.magnitude,
            self.config.max_duty,
            self.pwm.max_duty_cycle(),
        );
        self.pwm.set_duty_cycle(duty).map_err(|_| HBridgeError::Pwm)?;
        self.duty = duty;
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &HBridgeConfig {
        &self.config
    }

    /// Last drive requested
    pub fn last_drive(&self) -> Drive {
        self.last
    }

    /// Duty value currently written to the PWM channel
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Number of applies that failed to reach the outputs
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Release the pins and PWM channel
    pub fn release(self) -> (IN1, IN2, PWM) {
        (self.in1, self.in2, self.pwm)
    }
}

impl<IN1, IN2, PWM> MotorOutput for HBridgeMotor<IN1, IN2, PWM>
where
    IN1: OutputPin,
    IN2: OutputPin,
    PWM: SetDutyCycle,
{
    fn apply(&mut self, drive: Drive) {
        if self.try_apply(drive).is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }
}
