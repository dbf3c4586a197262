//! Motor driver implementations
//!
//! - H-bridge DC motor: two direction inputs plus a PWM magnitude channel
//! - PWM timing: carrier frequency to counter top and clock divider

pub mod hbridge;
pub mod timing;

pub use hbridge::{HBridgeConfig, HBridgeMotor};
pub use timing::{full_scale, pwm_timing, PwmTiming, TimingError};
