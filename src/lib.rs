//! An interactive shell front-end with its own raw-mode line editor.
//!
//! The terminal is switched to raw mode for each line ([`terminal`]), keystrokes
//! are decoded ([`input`]) and classified ([`keys`]), and the [`editor`] echoes them
//! while it builds the line. The finished line is split into a command and its
//! arguments ([`tokenizer`]) and handed to the [`Interpreter`], which runs one of
//! the builtins or an external program found on `PATH`.

mod builtin;
pub mod command;
pub mod config;
pub mod editor;
pub mod env;
pub mod error;
mod external;
pub mod input;
mod interpreter;
pub mod keys;
pub mod logging;
pub mod terminal;
#[cfg(test)]
mod test_support;
pub mod tokenizer;

pub use builtin::Builtin;
pub use error::ReadError;
pub use external::{ExternalCommand, find_command_path};

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
