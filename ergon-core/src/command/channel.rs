//! Command channel
//!
//! # Usage
//!
//! ```ignore
//! let mut channel = CommandChannel::new(uart_bytes);
//!
//! // Once per control tick:
//! match channel.try_receive() {
//!     Some(Ok(cmd)) => apply(cmd),
//!     Some(Err(e)) => report(e),
//!     None => {} // nothing complete yet
//! }
//! ```

use ergon_protocol::{decode_command, trim_line, Command, DecodeError, LineAssembler, LineError};

use crate::traits::ByteSource;

/// Errors reported for a received line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Line was not well-formed JSON
    Malformed(DecodeError),
    /// Line exceeded the line buffer and was dropped
    LineTooLong,
}

impl From<DecodeError> for CommandError {
    fn from(e: DecodeError) -> Self {
        CommandError::Malformed(e)
    }
}

impl From<LineError> for CommandError {
    fn from(e: LineError) -> Self {
        match e {
            LineError::TooLong => CommandError::LineTooLong,
        }
    }
}

/// Line-oriented command receiver over a [`ByteSource`]
#[derive(Debug)]
pub struct CommandChannel<S> {
    source: S,
    assembler: LineAssembler,
}

impl<S: ByteSource> CommandChannel<S> {
    /// Create a new command channel
    pub fn new(source: S) -> Self {
        Self {
            source,
            assembler: LineAssembler::new(),
        }
    }

    /// Poll for one command without blocking
    ///
    /// Consumes ready bytes until a line completes or the source runs dry.
    /// Zero-length lines are skipped; a line of only whitespace is reported
    /// as empty input. Bytes after a completed line stay in the source for
    /// the next poll.
    pub fn try_receive(&mut self) -> Option<Result<Command, CommandError>> {
        while let Some(byte) = self.source.try_read_byte() {
            let line = match self.assembler.feed(byte) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(e) => return Some(Err(e.into())),
            };

            if line.is_empty() {
                continue;
            }

            return Some(decode_command(trim_line(&line)).map_err(CommandError::from));
        }
        None
    }

    /// Get a mutable reference to the byte source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ergon_protocol::MAX_LINE_LEN;
    use heapless::Deque;

    type Queue = Deque<u8, 1024>;

    fn queue(bytes: &[u8]) -> Queue {
        let mut q = Queue::new();
        for &b in bytes {
            q.push_back(b).unwrap();
        }
        q
    }

    #[test]
    fn test_no_data_returns_none() {
        let mut channel = CommandChannel::new(Queue::new());
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_incomplete_line_returns_none() {
        let mut channel = CommandChannel::new(queue(b"{\"torque\": 5"));
        assert_eq!(channel.try_receive(), None);

        for &b in b"}\n" {
            channel.source_mut().push_back(b).unwrap();
        }
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(5, 0))));
    }

    #[test]
    fn test_one_command_per_call() {
        let mut channel = CommandChannel::new(queue(
            b"{\"torque\": 1}\n{\"torque\": 2, \"budget\": 9}\n",
        ));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(1, 0))));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(2, 9))));
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let mut channel = CommandChannel::new(queue(b"\n\n{\"budget\": 4}\r\n"));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(0, 4))));
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_whitespace_line_reported_empty() {
        let mut channel = CommandChannel::new(queue(b"   \r\n\r\n{\"torque\": 7}\n"));
        let empty = Some(Err(CommandError::Malformed(DecodeError::EmptyInput)));
        assert_eq!(channel.try_receive(), empty);
        assert_eq!(channel.try_receive(), empty);
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(7, 0))));
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_trailing_text_after_command_ignored() {
        let mut channel = CommandChannel::new(queue(b"{\"torque\": 5} x\n{\"torque\": 7}\n"));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(5, 0))));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(7, 0))));
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_malformed_line_reported() {
        let mut channel = CommandChannel::new(queue(b"hello\n{\"torque\": 3}\n"));
        assert_eq!(
            channel.try_receive(),
            Some(Err(CommandError::Malformed(DecodeError::InvalidInput)))
        );
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(3, 0))));
    }

    #[test]
    fn test_overlong_line_reported() {
        let mut bytes = Queue::new();
        for _ in 0..MAX_LINE_LEN + 1 {
            bytes.push_back(b' ').unwrap();
        }
        for &b in b"\n{\"torque\": 8}\n" {
            bytes.push_back(b).unwrap();
        }

        let mut channel = CommandChannel::new(bytes);
        assert_eq!(channel.try_receive(), Some(Err(CommandError::LineTooLong)));
        assert_eq!(channel.try_receive(), Some(Ok(Command::new(8, 0))));
    }
}
