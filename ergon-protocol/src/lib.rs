//! Operator link protocol
//!
//! This crate defines the text protocol spoken between the operator (a host
//! PC on the other end of the serial link) and the torque controller.
//!
//! # Protocol Overview
//!
//! Every message is a single newline-terminated line:
//! ```text
//! operator -> controller   {"torque": 50, "budget": 1000}\n
//! controller -> operator   Received command: torque = 50, budget += 1000\r\n
//! controller -> operator   Encoder Count: 12 | Energy Budget: 400\r\n
//! ```
//!
//! Commands are JSON objects. Both fields are optional and default to zero,
//! so `{"budget": 500}` tops up the ledger and stops the motor at the same
//! time. Replies are plain human-readable text.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod messages;

pub use command::{decode_command, Command, DecodeError};
pub use line::{trim_line, Line, LineAssembler, LineError, MAX_LINE_LEN};
pub use messages::{OperatorMessage, MAX_MESSAGE_LEN};
