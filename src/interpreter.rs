use crate::builtin::Builtin;
use crate::command::{EXIT_CANNOT_EXECUTE, EXIT_NOT_FOUND, ExitCode};
use crate::editor::LINE_TERMINATOR;
use crate::env::Environment;
use crate::error::ReadError;
use crate::external::ExternalCommand;
use crate::input::CodePointSource;
use crate::terminal::{RawModeSwitch, TerminalSession};
use crate::tokenizer::{self, CommandLine};
use std::io::{self, Write};
use tracing::{debug, info};

/// A minimal interactive shell: reads a line, tokenizes it and dispatches it to a
/// builtin or an external program.
///
/// The interpreter owns the [`Environment`], the only state that survives from one
/// line to the next.
///
/// Example
/// ```
/// use jbshell::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = sh.dispatch_with("echo", &["hello".into(), "world".into()], &mut out, &mut err).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello world\n");
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Run one command against the process stdout and stderr.
    ///
    /// # Errors
    /// See [`Interpreter::dispatch_with`].
    pub fn dispatch(&mut self, command: &str, args: &[String]) -> anyhow::Result<ExitCode> {
        self.dispatch_with(command, args, &mut io::stdout(), &mut io::stderr())
    }

    /// Run one command. Builtins write to `stdout`/`stderr`; external programs
    /// inherit the process streams.
    ///
    /// An empty command does nothing. An unknown command is reported on `stderr`
    /// and yields exit code 127.
    ///
    /// # Errors
    /// Only when `stdout` or `stderr` cannot be written.
    pub fn dispatch_with(
        &mut self,
        command: &str,
        args: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        if command.is_empty() {
            return Ok(0);
        }

        if let Some(builtin) = Builtin::from_name(command) {
            debug!(builtin = builtin.name(), ?args, "dispatching builtin");
            return builtin.execute(args, stdout, stderr, &mut self.env);
        }

        let Some(external) = ExternalCommand::resolve(&self.env, command, args) else {
            debug!(command, "command not found");
            writeln!(stderr, "{command}: command not found")?;
            return Ok(EXIT_NOT_FOUND);
        };

        debug!(program = %external.program().display(), ?args, "spawning");
        stdout.flush()?;
        match external.execute(&self.env) {
            Ok(code) => Ok(code),
            Err(e) => {
                writeln!(stderr, "{e:#}")?;
                Ok(EXIT_CANNOT_EXECUTE)
            }
        }
    }

    /// Tokenize `line` and dispatch it. A line with an empty command word is skipped.
    ///
    /// # Errors
    /// See [`Interpreter::dispatch_with`].
    pub fn run_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        let line = tokenizer::tokenize(line);
        if line.is_empty() {
            return Ok(0);
        }
        let CommandLine { command, args } = line;
        self.dispatch_with(&command, &args, stdout, stderr)
    }

    /// Read-eval-print loop.
    ///
    /// Runs until `exit` is dispatched or reading the terminal fails. Ctrl-C drops
    /// the line being typed and prompts again. Returns the status requested by
    /// `exit`.
    ///
    /// # Errors
    /// The [`ReadError::Io`] that ended the loop. End of input is included, so the
    /// caller decides whether it is a failure.
    pub fn repl<M, S, W>(
        &mut self,
        session: &mut TerminalSession<M, S, W>,
        stderr: &mut dyn Write,
    ) -> Result<ExitCode, ReadError>
    where
        M: RawModeSwitch,
        S: CodePointSource,
        W: Write,
    {
        while !self.env.should_exit {
            let line = match session.read_line() {
                Ok(line) => line,
                Err(ReadError::Interrupted) => {
                    debug!("line interrupted");
                    let out = session.output();
                    out.write_all(LINE_TERMINATOR.as_bytes())?;
                    out.flush()?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let code = self
                .run_line(&line, session.output(), stderr)
                .map_err(|e| ReadError::Io(io::Error::other(e)))?;
            debug!(code, "command finished");
        }
        info!(code = self.env.exit_code, "exit requested");
        Ok(self.env.exit_code)
    }
}
