use std::io;
use thiserror::Error;

/// Why reading a line from the terminal did not produce a line.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The user pressed Ctrl-C. The partially typed line is discarded.
    #[error("interrupted")]
    Interrupted,
    /// Reading from or writing to the terminal failed, including end of input.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl ReadError {
    /// True when input simply ran out (e.g. piped stdin was exhausted).
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
