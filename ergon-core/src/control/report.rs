//! Per-tick results handed back to the caller for logging and operator output

use ergon_protocol::{Command, OperatorMessage};

use crate::command::CommandError;
use crate::traits::Drive;

/// Periodic status snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Polarity-adjusted encoder position
    pub position: i64,
    /// Ledger balance after this tick
    pub balance: i64,
}

impl StatusSnapshot {
    /// Operator line for this snapshot
    pub fn message(&self) -> OperatorMessage {
        OperatorMessage::Status {
            position: self.position,
            balance: self.balance,
        }
    }
}

/// Everything that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Command received this tick, if any
    pub command: Option<Result<Command, CommandError>>,
    /// Encoder displacement this tick
    pub delta: i64,
    /// Ledger balance after the debit
    pub balance: i64,
    /// Drive applied to the motor
    pub drive: Drive,
    /// Status snapshot, when one was due
    pub status: Option<StatusSnapshot>,
}

impl TickReport {
    /// Operator line acknowledging or rejecting this tick's command
    pub fn command_message(&self) -> Option<OperatorMessage> {
        self.command.map(|result| match result {
            Ok(cmd) => OperatorMessage::CommandAccepted {
                torque: cmd.torque,
                budget: cmd.budget,
            },
            Err(CommandError::Malformed(e)) => OperatorMessage::ParseError(e),
            Err(CommandError::LineTooLong) => OperatorMessage::LineTooLong,
        })
    }
}
