//! Line assembly for the operator link.
//!
//! Bytes arrive from the UART in arbitrary chunks. The assembler collects
//! them into newline-terminated lines held in a fixed-capacity buffer:
//! - LF (`\n`) terminates a line
//! - CR and other surrounding whitespace are left for [`trim_line`]
//! - a line that outgrows the buffer is dropped up to its terminating LF

use heapless::Vec;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Maximum line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 256;

/// A complete received line, without its terminator
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// Errors that can occur during line assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    TooLong,
}

/// State machine collecting bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Line,
    /// Set once the current line overflowed; cleared at the next LF
    discarding: bool,
}

impl LineAssembler {
    /// Create a new, empty line assembler
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Reset the assembler, dropping any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the assembler
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err(TooLong)` at the
    /// terminator of a line that overflowed the buffer.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == LINE_END {
            if self.discarding {
                self.reset();
                return Err(LineError::TooLong);
            }
            let line = core::mem::take(&mut self.buffer);
            return Ok(Some(line));
        }

        if self.discarding {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
        }
        Ok(None)
    }
}

/// Strip leading and trailing ASCII whitespace (including CR) from a line
pub fn trim_line(line: &[u8]) -> &[u8] {
    line.trim_ascii()
}
