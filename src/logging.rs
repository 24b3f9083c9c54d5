//! Diagnostic logging setup.
//!
//! The terminal is in raw mode while a line is typed, so log lines written to
//! stderr would corrupt the display. Logs go to `--log-file` when given; on stderr
//! only warnings are shown unless a filter asks for more.

use crate::config::{LOG_ENV_VAR, ShellConfig};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const FILE_DEFAULT_FILTER: &str = "debug";
const STDERR_DEFAULT_FILTER: &str = "warn";

/// Pick the filter: explicit option, then the environment variable, then `fallback`.
fn build_filter(directive: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter {directive:?}")),
        None => Ok(EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(fallback))),
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Fails when the log file cannot be opened or the filter does not parse.
pub fn init(config: &ShellConfig) -> Result<()> {
    let directive = config.log_level.as_deref();
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("can't open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(directive, FILE_DEFAULT_FILTER)?)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(directive, STDERR_DEFAULT_FILTER)?)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
    }
    Ok(())
}
