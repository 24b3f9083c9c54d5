//! Pull-based source of `char`s for the line editor.
//!
//! Terminal input arrives as raw bytes. [`CharReader`] decodes them into `char`s one
//! at a time and keeps at most one decoded `char` of lookahead, so callers can
//! [`peek`](CodePointSource::peek) at the next key without consuming it.

use std::io::{self, Read};

/// A stream of `char`s with single-element lookahead.
///
/// End of stream is reported as an [`io::ErrorKind::UnexpectedEof`] error: the
/// editor never expects its input to run out in the middle of a line.
pub trait CodePointSource {
    /// Consume and return the next `char`.
    fn next(&mut self) -> io::Result<char>;

    /// Return the next `char` without consuming it.
    fn peek(&mut self) -> io::Result<char>;
}

/// Decodes UTF-8 from any [`Read`] implementation, one byte at a time.
#[derive(Debug)]
pub struct CharReader<R> {
    inner: R,
    peeked: Option<char>,
}

impl<R: Read> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
        }
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "end of input",
                    ));
                }
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn decode(&mut self) -> io::Result<char> {
        let first = self.read_byte()?;
        let width = utf8_width(first).ok_or_else(|| invalid_utf8(&[first]))?;

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?;
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| invalid_utf8(&bytes[..width]))
    }
}

impl<R: Read> CodePointSource for CharReader<R> {
    fn next(&mut self) -> io::Result<char> {
        match self.peeked.take() {
            Some(ch) => Ok(ch),
            None => self.decode(),
        }
    }

    fn peek(&mut self) -> io::Result<char> {
        if let Some(ch) = self.peeked {
            return Ok(ch);
        }
        let ch = self.decode()?;
        self.peeked = Some(ch);
        Ok(ch)
    }
}

/// Number of bytes in the UTF-8 sequence introduced by `first`.
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(bytes: &[u8]) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid UTF-8 sequence in input: {bytes:02x?}"),
    )
}
