use crate::command::ExitCode;
use crate::env::Environment;
use crate::external::ExternalCommand;
use anyhow::Result;
use std::env;
use std::io::Write;
use std::path::PathBuf;

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process. Each one writes its result to `stdout`, its
/// diagnostics to `stderr`, and returns an exit code; a usage mistake is reported
/// as a usage line, never as an `Err`. `Err` is reserved for failures writing the
/// output itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Type,
    Exit,
    Echo,
    Pwd,
    Cd,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Type,
        Builtin::Exit,
        Builtin::Echo,
        Builtin::Pwd,
        Builtin::Cd,
    ];

    /// Canonical name of the command, e.g. "echo" or "cd".
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Type => "type",
            Builtin::Exit => "exit",
            Builtin::Echo => "echo",
            Builtin::Pwd => "pwd",
            Builtin::Cd => "cd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Executes the builtin with the given arguments.
    ///
    /// # Errors
    /// Only when writing to `stdout` or `stderr` fails.
    pub fn execute(
        self,
        args: &[String],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match self {
            Builtin::Type => type_of(args, stdout, env),
            Builtin::Exit => exit(args, stderr, env),
            Builtin::Echo => echo(args, stdout),
            Builtin::Pwd => pwd(args, stdout, env),
            Builtin::Cd => cd(args, stdout, stderr, env),
        }
    }
}

fn type_of(args: &[String], stdout: &mut dyn Write, env: &Environment) -> Result<ExitCode> {
    let [name] = args else {
        writeln!(stdout, "usage: type [command]")?;
        return Ok(2);
    };

    if Builtin::from_name(name).is_some() {
        writeln!(stdout, "{name} is a shell builtin command")?;
        return Ok(0);
    }
    match ExternalCommand::resolve(env, name, &[]) {
        Some(cmd) => {
            writeln!(stdout, "{name} is {}", cmd.program().display())?;
            Ok(0)
        }
        None => {
            writeln!(stdout, "{name}: is not recognised")?;
            Ok(1)
        }
    }
}

fn exit(args: &[String], stderr: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
    // Only a lone argument is taken as the status.
    let code = match args {
        [arg] => match arg.parse::<ExitCode>() {
            Ok(code) => code,
            Err(_) => {
                writeln!(
                    stderr,
                    "invalid argument passed, argument must be an integer"
                )?;
                1
            }
        },
        _ => 0,
    };
    env.request_exit(code);
    Ok(code)
}

fn echo(args: &[String], stdout: &mut dyn Write) -> Result<ExitCode> {
    writeln!(stdout, "{}", args.join(" "))?;
    Ok(0)
}

fn pwd(args: &[String], stdout: &mut dyn Write, env: &Environment) -> Result<ExitCode> {
    if !args.is_empty() {
        writeln!(stdout, "usage: pwd\t(no arguments)")?;
        return Ok(2);
    }
    writeln!(stdout, "{}", env.current_dir.display())?;
    Ok(0)
}

fn cd(
    args: &[String],
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
    env: &mut Environment,
) -> Result<ExitCode> {
    let [target] = args else {
        writeln!(stdout, "usage: cd [path]")?;
        return Ok(2);
    };

    let path = if target == "~" {
        match env.get_var("HOME") {
            Some(home) => PathBuf::from(home),
            None => {
                writeln!(stderr, "Could not change directory to: {target} HOME not set")?;
                return Ok(1);
            }
        }
    } else {
        env.current_dir.join(target)
    };

    let changed = path
        .canonicalize()
        .and_then(|canonical| env::set_current_dir(&canonical).map(|()| canonical));
    match changed {
        Ok(canonical) => {
            env.current_dir = canonical;
            Ok(0)
        }
        Err(e) => {
            writeln!(stderr, "Could not change directory to: {target} {e}")?;
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env as stdenv;
    use crate::test_support::lock_current_dir;

    fn test_env() -> Environment {
        Environment {
            vars: HashMap::new(),
            current_dir: stdenv::current_dir().unwrap(),
            should_exit: false,
            exit_code: 0,
        }
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    /// Runs a builtin and returns (exit code, stdout, stderr).
    fn run(builtin: Builtin, words: &[&str], env: &mut Environment) -> (ExitCode, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = builtin
            .execute(&args(words), &mut out, &mut err, env)
            .unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_from_name() {
        for builtin in Builtin::ALL {
            assert_eq!(Builtin::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(Builtin::from_name("ls"), None);
        assert_eq!(Builtin::from_name(""), None);
    }

    #[test]
    fn test_echo_joins_without_trailing_space() {
        let mut env = test_env();
        let (code, out, _) = run(Builtin::Echo, &["hello", "world"], &mut env);
        assert_eq!(code, 0);
        assert_eq!(out, "hello world\n");
    }

    #[test]
    fn test_echo_no_args_prints_empty_line() {
        let mut env = test_env();
        let (_, out, _) = run(Builtin::Echo, &[], &mut env);
        assert_eq!(out, "\n");
    }

    #[test]
    fn test_echo_keeps_dash_arguments() {
        let mut env = test_env();
        let (_, out, _) = run(Builtin::Echo, &["-n", "x"], &mut env);
        assert_eq!(out, "-n x\n");
    }

    #[test]
    fn test_pwd_prints_current_dir() {
        let mut env = test_env();
        let expected = format!("{}\n", env.current_dir.display());
        let (code, out, _) = run(Builtin::Pwd, &[], &mut env);
        assert_eq!(code, 0);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_pwd_rejects_args() {
        let mut env = test_env();
        let (code, out, _) = run(Builtin::Pwd, &["x"], &mut env);
        assert_ne!(code, 0);
        assert_eq!(out, "usage: pwd\t(no arguments)\n");
    }

    #[test]
    fn test_type_builtin() {
        let mut env = test_env();
        let (code, out, _) = run(Builtin::Type, &["cd"], &mut env);
        assert_eq!(code, 0);
        assert_eq!(out, "cd is a shell builtin command\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_type_external() {
        let mut env = test_env();
        env.set_var("PATH", "/bin");
        let (code, out, _) = run(Builtin::Type, &["sh"], &mut env);
        assert_eq!(code, 0);
        assert_eq!(out, "sh is /bin/sh\n");
    }

    #[test]
    fn test_type_unknown() {
        let mut env = test_env();
        env.set_var("PATH", "");
        let (code, out, _) = run(Builtin::Type, &["nope-xyz"], &mut env);
        assert_eq!(code, 1);
        assert_eq!(out, "nope-xyz: is not recognised\n");
    }

    #[test]
    fn test_type_usage() {
        let mut env = test_env();
        let (_, out, _) = run(Builtin::Type, &[], &mut env);
        assert_eq!(out, "usage: type [command]\n");
        let (_, out, _) = run(Builtin::Type, &["a", "b"], &mut env);
        assert_eq!(out, "usage: type [command]\n");
    }

    #[test]
    fn test_exit_default_code() {
        let mut env = test_env();
        let (code, _, _) = run(Builtin::Exit, &[], &mut env);
        assert_eq!(code, 0);
        assert!(env.should_exit);
        assert_eq!(env.exit_code, 0);
    }

    #[test]
    fn test_exit_with_code() {
        let mut env = test_env();
        run(Builtin::Exit, &["42"], &mut env);
        assert!(env.should_exit);
        assert_eq!(env.exit_code, 42);
    }

    #[test]
    fn test_exit_invalid_code() {
        let mut env = test_env();
        let (_, _, err) = run(Builtin::Exit, &["abc"], &mut env);
        assert!(env.should_exit);
        assert_eq!(env.exit_code, 1);
        assert_eq!(err, "invalid argument passed, argument must be an integer\n");
    }

    #[test]
    fn test_cd_usage() {
        let mut env = test_env();
        let before = env.current_dir.clone();
        let (code, out, _) = run(Builtin::Cd, &[], &mut env);
        assert_ne!(code, 0);
        assert_eq!(out, "usage: cd [path]\n");
        assert_eq!(env.current_dir, before);
    }

    #[test]
    fn test_cd_to_absolute_and_relative() {
        let _lock = lock_current_dir();
        let cwd_before = stdenv::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let canonical = tmp.path().canonicalize().unwrap();

        let mut env = test_env();
        let (code, _, err) = run(Builtin::Cd, &[canonical.to_str().unwrap()], &mut env);
        assert_eq!((code, err.as_str()), (0, ""));
        assert_eq!(env.current_dir, canonical);

        let (code, _, _) = run(Builtin::Cd, &["sub"], &mut env);
        assert_eq!(code, 0);
        assert_eq!(env.current_dir, canonical.join("sub"));
        assert_eq!(stdenv::current_dir().unwrap(), canonical.join("sub"));

        stdenv::set_current_dir(cwd_before).unwrap();
    }

    #[test]
    fn test_cd_home() {
        let _lock = lock_current_dir();
        let cwd_before = stdenv::current_dir().unwrap();
        let home = tempfile::tempdir().unwrap();
        let canonical = home.path().canonicalize().unwrap();

        let mut env = test_env();
        env.set_var("HOME", canonical.to_str().unwrap());
        let (code, _, _) = run(Builtin::Cd, &["~"], &mut env);
        assert_eq!(code, 0);
        assert_eq!(env.current_dir, canonical);

        stdenv::set_current_dir(cwd_before).unwrap();
    }

    #[test]
    fn test_cd_missing_dir_reports_error() {
        let mut env = test_env();
        let before = env.current_dir.clone();
        let (code, _, err) = run(Builtin::Cd, &["/definitely/not/here"], &mut env);
        assert_eq!(code, 1);
        assert!(err.starts_with("Could not change directory to: /definitely/not/here "));
        assert_eq!(env.current_dir, before);
    }
}
