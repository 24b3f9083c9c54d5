//! Classification of raw terminal input into key events.

use crate::input::CodePointSource;
use std::io;
use tracing::trace;

const TAB: char = '\t';
const ESCAPE: char = '\x1b';
const CTRL_C: char = '\x03';
const BACKSPACE: char = '\x08';
const DELETE: char = '\x7f';

/// Direction of an arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

/// Input that is recognized and deliberately dropped by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredKey {
    Tab,
    Arrow(Direction),
    /// Any other escape sequence (Home, End, Delete, a lone `ESC`...).
    EscapeSequence,
}

/// A single logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Printable(char),
    Submit,
    Erase,
    Interrupt,
    Ignored(IgnoredKey),
}

/// Read the next key from `source`.
///
/// # Errors
/// Returns the underlying I/O error, including end of input in the middle of an
/// escape sequence.
pub fn read_key(source: &mut impl CodePointSource) -> io::Result<KeyEvent> {
    let first = source.next()?;
    classify(first, source)
}

/// Classify `first`, consuming any further `char`s that belong to the same key.
///
/// # Errors
/// Fails when the lookahead for an escape sequence cannot be read.
pub fn classify(first: char, source: &mut impl CodePointSource) -> io::Result<KeyEvent> {
    let event = match first {
        TAB => KeyEvent::Ignored(IgnoredKey::Tab),
        ESCAPE => KeyEvent::Ignored(classify_escape(source)?),
        '\r' | '\n' => KeyEvent::Submit,
        CTRL_C => KeyEvent::Interrupt,
        BACKSPACE | DELETE => KeyEvent::Erase,
        c => KeyEvent::Printable(c),
    };
    if let KeyEvent::Ignored(key) = event {
        trace!(?key, "ignored key");
    }
    Ok(event)
}

/// Swallow the rest of an escape sequence. `ESC` has already been consumed.
fn classify_escape(source: &mut impl CodePointSource) -> io::Result<IgnoredKey> {
    match source.peek()? {
        '[' => {
            source.next()?;
            let mut params = false;
            loop {
                let c = source.next()?;
                match c {
                    // parameter and intermediate bytes
                    '\x20'..='\x3f' => params = true,
                    '\x40'..='\x7e' => {
                        return Ok(match arrow(c) {
                            Some(dir) if !params => IgnoredKey::Arrow(dir),
                            _ => IgnoredKey::EscapeSequence,
                        });
                    }
                    _ => return Ok(IgnoredKey::EscapeSequence),
                }
            }
        }
        'O' => {
            source.next()?;
            let c = source.peek()?;
            if !is_ss3_final(c) {
                return Ok(IgnoredKey::EscapeSequence);
            }
            source.next()?;
            Ok(arrow(c).map_or(IgnoredKey::EscapeSequence, IgnoredKey::Arrow))
        }
        _ => Ok(IgnoredKey::EscapeSequence),
    }
}

/// Keys sent as `ESC O <final>`: arrows, Home, End and F1-F4.
fn is_ss3_final(c: char) -> bool {
    matches!(c, 'A'..='D' | 'H' | 'F' | 'P'..='S')
}

fn arrow(c: char) -> Option<Direction> {
    match c {
        'A' => Some(Direction::Up),
        'B' => Some(Direction::Down),
        'C' => Some(Direction::Right),
        'D' => Some(Direction::Left),
        _ => None,
    }
}
