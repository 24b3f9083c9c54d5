use jbshell::config::ShellConfig;
use jbshell::env::Environment;
use jbshell::input::CharReader;
use jbshell::terminal::{CrosstermRawMode, NoRawMode, RawModeSwitch, TerminalSession};
use jbshell::{Interpreter, logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn run<M: RawModeSwitch>(mode: M, config: &ShellConfig) -> ExitCode {
    let session_input = CharReader::new(io::stdin().lock());
    let mut session = TerminalSession::new(mode, session_input, io::stdout(), config.prompt.as_str());
    let mut shell = Interpreter::new(Environment::new());

    let code = match shell.repl(&mut session, &mut io::stderr()) {
        Ok(code) => code,
        Err(e) if e.is_end_of_input() => shell.env().exit_code,
        Err(e) => {
            tracing::error!(error = %e, "shell stopped");
            eprintln!("{e}");
            1
        }
    };
    // Like other shells, only the low byte of the status survives.
    ExitCode::from((code & 0xff) as u8)
}

fn main() -> ExitCode {
    let config: ShellConfig = argh::from_env();
    if let Err(e) = logging::init(&config) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    if io::stdin().is_terminal() {
        run(CrosstermRawMode, &config)
    } else {
        run(NoRawMode, &config)
    }
}
