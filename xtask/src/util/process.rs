//! External process execution behind a small seam so the build steps can be
//! driven by a recording runner in tests.

use log::{debug, info};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// One external command: program, arguments, working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<OsString>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    #[cfg(test)]
    pub fn has_arg(&self, arg: impl AsRef<OsStr>) -> bool {
        self.args.iter().any(|a| a.as_os_str() == arg.as_ref())
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for a in &self.args {
            let a = a.to_string_lossy();
            if a.contains(char::is_whitespace) {
                write!(f, " \"{a}\"")?;
            } else {
                write!(f, " {a}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("`{program}` not found in PATH")]
    NotFound { program: String },
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("`{program}` {exit}")]
    Failed { program: String, exit: Exit },
}

/// How a process ended; `None` when it was killed by a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit(pub Option<i32>);

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, "exited with status {c}"),
            None => f.write_str("was terminated by a signal"),
        }
    }
}

pub trait CommandRunner {
    /// Runs the invocation to completion; success is a zero exit status.
    fn execute(&mut self, invocation: &Invocation) -> Result<(), ProcessError>;
}

/// Spawns real processes with inherited stdio and waits for each one.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
        let program = locate(&invocation.program, &invocation.cwd).ok_or_else(|| {
            ProcessError::NotFound {
                program: invocation.program_name(),
            }
        })?;
        debug!("resolved {} -> {}", invocation.program_name(), program.display());
        debug!("running `{invocation}` in {}", invocation.cwd.display());

        let status = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ProcessError::NotFound {
                        program: invocation.program_name(),
                    }
                } else {
                    ProcessError::Spawn {
                        program: invocation.program_name(),
                        source,
                    }
                }
            })?;

        if !status.success() {
            return Err(ProcessError::Failed {
                program: invocation.program_name(),
                exit: Exit(status.code()),
            });
        }
        Ok(())
    }
}

fn locate(program: &OsStr, cwd: &Path) -> Option<PathBuf> {
    which::which_in(program, env::var_os("PATH"), cwd).ok()
}

/// Logs each invocation instead of running it.
#[derive(Debug, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn execute(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
        info!("[dry-run] {invocation}");
        Ok(())
    }
}

#[cfg(test)]
pub mod testing {
    use super::{CommandRunner, Exit, Invocation, ProcessError};

    /// Records every invocation and answers with scripted outcomes keyed by
    /// program name. Unscripted programs succeed.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub calls: Vec<Invocation>,
        missing: Vec<String>,
        failing: Vec<(String, i32)>,
    }

    impl RecordingRunner {
        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        pub fn failing(mut self, program: &str, code: i32) -> Self {
            self.failing.push((program.to_string(), code));
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls.iter().map(Invocation::program_name).collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn execute(&mut self, invocation: &Invocation) -> Result<(), ProcessError> {
            self.calls.push(invocation.clone());
            let program = invocation.program_name();
            if self.missing.contains(&program) {
                return Err(ProcessError::NotFound { program });
            }
            if let Some((_, code)) = self.failing.iter().find(|(p, _)| *p == program) {
                return Err(ProcessError::Failed {
                    program,
                    exit: Exit(Some(*code)),
                });
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let inv = Invocation::new("iscc", "/tmp")
            .arg("C:\\Program Files\\Comi\\setup.iss")
            .arg("/DMyAppVersion=1.2.3");
        assert_eq!(
            inv.to_string(),
            "iscc \"C:\\Program Files\\Comi\\setup.iss\" /DMyAppVersion=1.2.3"
        );
    }

    #[test]
    fn failed_status_message() {
        let e = ProcessError::Failed {
            program: "cargo".into(),
            exit: Exit(Some(101)),
        };
        assert_eq!(e.to_string(), "`cargo` exited with status 101");
        let e = ProcessError::Failed {
            program: "cargo".into(),
            exit: Exit(None),
        };
        assert_eq!(e.to_string(), "`cargo` was terminated by a signal");
    }

    #[test]
    fn system_runner_reports_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("comi-xtask-no-such-program", dir.path());
        let err = SystemRunner.execute(&inv).unwrap_err();
        assert!(matches!(err, ProcessError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_maps_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        SystemRunner.execute(&Invocation::new("true", dir.path())).unwrap();
        let err = SystemRunner
            .execute(&Invocation::new("false", dir.path()))
            .unwrap_err();
        assert!(matches!(err, ProcessError::Failed { exit: Exit(Some(1)), .. }));
    }

    #[test]
    fn dry_runner_never_fails() {
        let inv = Invocation::new("comi-xtask-no-such-program", "/");
        assert!(DryRunner.execute(&inv).is_ok());
    }
}
