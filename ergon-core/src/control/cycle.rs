//! The control loop state machine
//!
//! A single steady-state cycle, run once per tick:
//!
//! 1. Poll the command channel; apply a command (torque overwrite, ledger
//!    credit) or report the rejection
//! 2. Read the encoder displacement
//! 3. Debit `delta * torque`, using the torque that drives this tick
//! 4. Gate the torque on the resulting balance and apply the drive
//! 5. Emit a status snapshot when one is due
//!
//! Nothing in a tick blocks, and nothing fails: rejected commands leave the
//! torque and the ledger untouched.

use ergon_protocol::Command;

use super::report::{StatusSnapshot, TickReport};
use crate::command::CommandChannel;
use crate::config::ControlConfig;
use crate::energy::{EnergyLedger, TorqueGate};
use crate::motion::EncoderTracker;
use crate::traits::{ByteSource, Drive, EncoderCounter, MotorOutput};

/// Energy-budgeted torque controller
///
/// Owns every piece of mutable control state; nothing is shared.
pub struct ControlLoop<C, S, M> {
    encoder: EncoderTracker<C>,
    commands: CommandChannel<S>,
    motor: M,
    ledger: EnergyLedger,
    /// Torque of the most recent accepted command
    torque: i32,
    status_interval_ms: u64,
    last_status_ms: u64,
    ticks: u64,
}

impl<C, S, M> ControlLoop<C, S, M>
where
    C: EncoderCounter,
    S: ByteSource,
    M: MotorOutput,
{
    /// Create a control loop
    ///
    /// Clears the encoder counter, seeds the displacement baseline and
    /// stops the motor.
    pub fn new(config: &ControlConfig, counter: C, source: S, mut motor: M) -> Self {
        motor.apply(Drive::STOP);
        Self {
            encoder: EncoderTracker::new(counter, config.polarity()),
            commands: CommandChannel::new(source),
            motor,
            ledger: EnergyLedger::new(),
            torque: 0,
            status_interval_ms: config.status_interval_ms as u64,
            last_status_ms: 0,
            ticks: 0,
        }
    }

    /// Run one control cycle
    ///
    /// `now_ms` is a monotonic timestamp used only for status cadence.
    pub fn tick(&mut self, now_ms: u64) -> TickReport {
        let command = self.commands.try_receive();
        if let Some(Ok(cmd)) = command {
            self.apply_command(cmd);
        }

        let delta = self.encoder.read_delta();
        self.ledger.debit_motion(delta, self.torque);
        let balance = self.ledger.balance();

        let drive = TorqueGate::decide(self.torque, balance);
        self.motor.apply(drive);

        let status = if now_ms.saturating_sub(self.last_status_ms) > self.status_interval_ms {
            self.last_status_ms = now_ms;
            Some(StatusSnapshot {
                position: self.encoder.position(),
                balance,
            })
        } else {
            None
        };

        self.ticks = self.ticks.wrapping_add(1);

        TickReport {
            command,
            delta,
            balance,
            drive,
            status,
        }
    }

    /// Torque replaces the previous value; budget adds to the ledger
    fn apply_command(&mut self, cmd: Command) {
        self.torque = cmd.torque;
        self.ledger.credit(cmd.budget as i64);
    }

    /// Torque of the most recent accepted command (0 before any)
    pub fn commanded_torque(&self) -> i32 {
        self.torque
    }

    /// Current ledger balance
    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    /// Polarity-adjusted encoder position at the last tick
    pub fn position(&self) -> i64 {
        self.encoder.position()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Get a reference to the motor output
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// Get a mutable reference to the command byte source
    pub fn source_mut(&mut self) -> &mut S {
        self.commands.source_mut()
    }
}
