//! Raw-mode terminal session wrapping one line read.

use crate::editor;
use crate::error::ReadError;
use crate::input::CodePointSource;
use crossterm::terminal;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Something that can switch the terminal in and out of raw mode.
pub trait RawModeSwitch {
    fn enable(&mut self) -> io::Result<()>;
    fn disable(&mut self) -> io::Result<()>;
}

/// The controlling terminal, switched through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermRawMode;

impl RawModeSwitch for CrosstermRawMode {
    fn enable(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// Used when stdin is not a terminal: there is no mode to change.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRawMode;

impl RawModeSwitch for NoRawMode {
    fn enable(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn disable(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
#[derive(Debug)]
pub struct RawModeGuard<'a, M: RawModeSwitch> {
    switch: &'a mut M,
}

impl<'a, M: RawModeSwitch> RawModeGuard<'a, M> {
    /// Enable raw mode and return a guard that disables it on drop.
    ///
    /// # Errors
    /// Fails if the terminal refuses the mode change; nothing needs restoring then.
    pub fn acquire(switch: &'a mut M) -> io::Result<Self> {
        switch.enable()?;
        debug!("entered raw mode");
        Ok(Self { switch })
    }
}

impl<M: RawModeSwitch> Drop for RawModeGuard<'_, M> {
    fn drop(&mut self) {
        match self.switch.disable() {
            Ok(()) => debug!("left raw mode"),
            Err(e) => warn!(error = %e, "failed to restore terminal mode"),
        }
    }
}

/// Everything needed to read lines interactively.
#[derive(Debug)]
pub struct TerminalSession<M, S, W> {
    mode: M,
    source: S,
    output: W,
    prompt: String,
}

impl<M: RawModeSwitch, S: CodePointSource, W: Write> TerminalSession<M, S, W> {
    pub fn new(mode: M, source: S, output: W, prompt: impl Into<String>) -> Self {
        Self {
            mode,
            source,
            output,
            prompt: prompt.into(),
        }
    }

    /// Print the prompt and read one line in raw mode.
    ///
    /// # Errors
    /// [`ReadError::Interrupted`] on Ctrl-C, [`ReadError::Io`] on terminal failure or
    /// end of input. The previous terminal mode is restored in every case.
    pub fn read_line(&mut self) -> Result<String, ReadError> {
        let _guard = RawModeGuard::acquire(&mut self.mode)?;
        self.output.write_all(self.prompt.as_bytes())?;
        self.output.flush()?;
        editor::edit_line(&mut self.source, &mut self.output)
    }

    /// Output stream shared with the editor, for writing outside of a read.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CharReader;
    use std::io::Cursor;

    /// Records the mode changes it is asked to make.
    #[derive(Debug, Default)]
    struct RecordingSwitch {
        raw: bool,
        enabled: usize,
        disabled: usize,
        refuse: bool,
    }

    impl RawModeSwitch for RecordingSwitch {
        fn enable(&mut self) -> io::Result<()> {
            if self.refuse {
                return Err(io::Error::other("not a terminal"));
            }
            self.raw = true;
            self.enabled += 1;
            Ok(())
        }

        fn disable(&mut self) -> io::Result<()> {
            self.raw = false;
            self.disabled += 1;
            Ok(())
        }
    }

    fn session(
        input: &str,
    ) -> TerminalSession<RecordingSwitch, CharReader<Cursor<Vec<u8>>>, Vec<u8>> {
        TerminalSession::new(
            RecordingSwitch::default(),
            CharReader::new(Cursor::new(input.as_bytes().to_vec())),
            Vec::new(),
            "$ ",
        )
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let mut switch = RecordingSwitch::default();
        {
            let _guard = RawModeGuard::acquire(&mut switch).unwrap();
        }
        assert!(!switch.raw);
        assert_eq!((switch.enabled, switch.disabled), (1, 1));
    }

    #[test]
    fn test_read_line_prints_prompt_and_restores() {
        let mut session = session("pwd\r");
        assert_eq!(session.read_line().unwrap(), "pwd");
        assert_eq!(String::from_utf8_lossy(&session.output), "$ pwd\r\n");
        assert!(!session.mode.raw);
        assert_eq!((session.mode.enabled, session.mode.disabled), (1, 1));
    }

    #[test]
    fn test_restores_after_interrupt() {
        let mut session = session("abc\x03");
        assert!(matches!(session.read_line(), Err(ReadError::Interrupted)));
        assert!(!session.mode.raw);
        assert_eq!(session.mode.disabled, 1);
    }

    #[test]
    fn test_restores_after_io_error() {
        let mut session = session("abc");
        assert!(session.read_line().unwrap_err().is_end_of_input());
        assert!(!session.mode.raw);
        assert_eq!(session.mode.disabled, 1);
    }

    #[test]
    fn test_each_read_is_its_own_session() {
        let mut session = session("a\rb\x03c\r");
        assert_eq!(session.read_line().unwrap(), "a");
        assert!(session.read_line().is_err());
        assert_eq!(session.read_line().unwrap(), "c");
        assert_eq!((session.mode.enabled, session.mode.disabled), (3, 3));
    }

    #[test]
    fn test_refused_raw_mode_is_io_error() {
        let mut session = session("a\r");
        session.mode.refuse = true;
        assert!(matches!(session.read_line(), Err(ReadError::Io(_))));
        assert_eq!(session.mode.disabled, 0);
        assert!(session.output.is_empty());
    }
}
