//! Messages from the controller to the operator
//!
//! All replies are single human-readable lines terminated by CRLF so they
//! display correctly in any serial terminal.

use core::fmt::{self, Write};

use heapless::String;

use crate::command::DecodeError;

/// Maximum rendered message length in bytes, including the terminator
pub const MAX_MESSAGE_LEN: usize = 96;

/// Messages sent from the controller to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatorMessage {
    /// Controller finished booting and accepts commands
    Ready,
    /// A command was decoded and applied
    CommandAccepted {
        /// New commanded torque
        torque: i32,
        /// Credit added to the ledger
        budget: i32,
    },
    /// A command line was not valid JSON
    ParseError(DecodeError),
    /// A command line exceeded the line buffer and was dropped
    LineTooLong,
    /// Periodic status snapshot
    Status {
        /// Polarity-adjusted encoder position
        position: i64,
        /// Current ledger balance
        balance: i64,
    },
}

impl fmt::Display for OperatorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorMessage::Ready => {
                f.write_str("System Initialized. Waiting for JSON commands...")
            }
            OperatorMessage::CommandAccepted { torque, budget } => {
                write!(f, "Received command: torque = {}, budget += {}", torque, budget)
            }
            OperatorMessage::ParseError(e) => write!(f, "JSON parse error: {}", e),
            OperatorMessage::LineTooLong => f.write_str("Command rejected: line too long"),
            OperatorMessage::Status { position, balance } => {
                write!(f, "Encoder Count: {} | Energy Budget: {}", position, balance)
            }
        }
    }
}

impl OperatorMessage {
    /// Render this message as a CRLF-terminated line
    pub fn render(&self) -> Result<String<MAX_MESSAGE_LEN>, fmt::Error> {
        let mut line = String::new();
        write!(line, "{}\r\n", self)?;
        Ok(line)
    }
}
