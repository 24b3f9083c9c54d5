use argh::FromArgs;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "JBShell * > ";

/// Environment variable consulted for the log filter when `--log-level` is absent.
pub const LOG_ENV_VAR: &str = "JBSHELL_LOG";

#[derive(FromArgs, Debug, Clone, PartialEq, Eq)]
/// An interactive shell with a raw-mode line editor.
pub struct ShellConfig {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text printed before each line is read.
    pub prompt: String,

    #[argh(option)]
    /// write diagnostic logs to this file instead of standard error.
    pub log_file: Option<PathBuf>,

    #[argh(option)]
    /// log filter directive, e.g. "debug" or "jbshell=trace". Defaults to $JBSHELL_LOG.
    pub log_level: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            log_file: None,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ShellConfig, argh::EarlyExit> {
        ShellConfig::from_args(&["jbshell"], args)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_all_options() {
        let config = parse(&[
            "--prompt",
            "$ ",
            "--log-file",
            "/tmp/jbshell.log",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/jbshell.log")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["--history"]).unwrap_err();
        assert!(err.status.is_err());
    }

    #[test]
    fn test_help_is_early_exit() {
        let exit = parse(&["--help"]).unwrap_err();
        assert!(exit.status.is_ok());
        assert!(exit.output.contains("--prompt"));
    }
}
