//! Motor output trait
//!
//! The control loop decides a [`Drive`] every tick and hands it to a
//! [`MotorOutput`]. How the drive is realized (H-bridge pins, PWM resolution,
//! duty clamping) is up to the driver.

/// Drive instruction for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Drive {
    /// Unsigned drive magnitude (0 = stopped)
    pub magnitude: u32,
    /// Rotation direction (true = forward)
    pub forward: bool,
}

impl Drive {
    /// Motor stopped, direction pins left in the forward state
    pub const STOP: Drive = Drive {
        magnitude: 0,
        forward: true,
    };

    /// Create a forward drive
    pub const fn forward(magnitude: u32) -> Self {
        Self {
            magnitude,
            forward: true,
        }
    }

    /// Create a reverse drive
    pub const fn reverse(magnitude: u32) -> Self {
        Self {
            magnitude,
            forward: false,
        }
    }

    /// Check if this drive stops the motor
    pub const fn is_stopped(&self) -> bool {
        self.magnitude == 0
    }
}

impl Default for Drive {
    fn default() -> Self {
        Self::STOP
    }
}

/// Actuator that turns a [`Drive`] into motor output
pub trait MotorOutput {
    /// Apply the drive decided for this tick
    fn apply(&mut self, drive: Drive);
}

impl<T: MotorOutput + ?Sized> MotorOutput for &mut T {
    fn apply(&mut self, drive: Drive) {
        (**self).apply(drive)
    }
}
