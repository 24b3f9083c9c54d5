//! Single-line editor driven by classified key events.
//!
//! Raw mode disables the terminal's own echo, so the editor writes back every
//! accepted keystroke itself and flushes before reading the next one.

use crate::error::ReadError;
use crate::input::CodePointSource;
use crate::keys::{self, KeyEvent};
use std::io::Write;

/// Moves the cursor back, blanks the cell, moves back again.
pub const ERASE_SEQUENCE: &str = "\x08 \x08";

/// Written once after the line is submitted. Raw mode needs the explicit `\r`.
pub const LINE_TERMINATOR: &str = "\r\n";

/// The line being typed. The cursor is always at the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    chars: Vec<char>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) {
        self.chars.push(ch);
    }

    /// Remove the last `char`, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.chars.pop()
    }

    pub fn into_line(self) -> String {
        self.chars.into_iter().collect()
    }
}

/// Reads one line from `source`, echoing edits to `output`.
#[derive(Debug)]
pub struct LineEditor<'a, S, W> {
    source: &'a mut S,
    output: &'a mut W,
    buffer: InputBuffer,
}

impl<'a, S: CodePointSource, W: Write> LineEditor<'a, S, W> {
    pub fn new(source: &'a mut S, output: &'a mut W) -> Self {
        Self {
            source,
            output,
            buffer: InputBuffer::new(),
        }
    }

    /// Run until the line is submitted or aborted.
    ///
    /// # Errors
    /// [`ReadError::Interrupted`] on Ctrl-C, [`ReadError::Io`] when the input ends or
    /// the terminal cannot be read or written.
    pub fn edit_loop(mut self) -> Result<String, ReadError> {
        loop {
            match keys::read_key(&mut *self.source)? {
                KeyEvent::Printable(ch) => {
                    self.buffer.push(ch);
                    let mut utf8 = [0u8; 4];
                    self.echo(ch.encode_utf8(&mut utf8))?;
                }
                KeyEvent::Erase => {
                    if self.buffer.pop().is_some() {
                        self.echo(ERASE_SEQUENCE)?;
                    }
                }
                KeyEvent::Submit => break,
                KeyEvent::Interrupt => return Err(ReadError::Interrupted),
                KeyEvent::Ignored(_) => {}
            }
        }
        self.echo(LINE_TERMINATOR)?;
        Ok(self.buffer.into_line())
    }

    fn echo(&mut self, text: &str) -> Result<(), ReadError> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

/// Convenience wrapper around [`LineEditor::edit_loop`].
///
/// # Errors
/// See [`LineEditor::edit_loop`].
pub fn edit_line<S: CodePointSource, W: Write>(
    source: &mut S,
    output: &mut W,
) -> Result<String, ReadError> {
    LineEditor::new(source, output).edit_loop()
}
