/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Exit code reported when a command cannot be found.
pub const EXIT_NOT_FOUND: ExitCode = 127;

/// Exit code reported when a command was found but could not be started.
pub const EXIT_CANNOT_EXECUTE: ExitCode = 126;
