//! Operator command intake
//!
//! Pulls bytes from a non-blocking source, assembles lines and decodes at
//! most one command per poll.

pub mod channel;

pub use channel::{CommandChannel, CommandError};
