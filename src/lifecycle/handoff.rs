//! Process handoff.
//!
//! The last step of every successful run: the entrypoint replaces its own
//! process image with the target command. PID, environment and standard
//! streams carry over, and from then on the exit status is the target's.

use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("no command given")]
    EmptyCommand,

    #[error("failed to exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// The target command, held until it is exec'd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
    argv: Vec<OsString>,
}

impl Launch {
    /// Rejects an empty argument vector.
    pub fn new(argv: Vec<OsString>) -> Result<Self, HandoffError> {
        if argv.is_empty() {
            return Err(HandoffError::EmptyCommand);
        }
        Ok(Self { argv })
    }

    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    pub fn program(&self) -> &OsStr {
        &self.argv[0]
    }

    /// Replace the current process with the target command.
    ///
    /// Never returns on success. `PATH` is searched when the program has no
    /// slash, as `exec "$@"` would.
    pub fn exec(self) -> Result<Infallible, HandoffError> {
        tracing::info!(
            command = %self.program().to_string_lossy(),
            args = self.argv.len() - 1,
            "Handing off to target command"
        );

        let source = Command::new(self.program()).args(&self.argv[1..]).exec();

        Err(HandoffError::Exec {
            program: self.program().to_string_lossy().into_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_argv_is_rejected() {
        assert!(matches!(Launch::new(Vec::new()), Err(HandoffError::EmptyCommand)));
    }

    #[test]
    fn argv_is_kept_verbatim() {
        let argv: Vec<OsString> = ["gunicorn", "--bind", "0.0.0.0:8000", ""]
            .iter()
            .map(OsString::from)
            .collect();
        let launch = Launch::new(argv.clone()).unwrap();

        assert_eq!(launch.argv(), argv.as_slice());
        assert_eq!(launch.program(), "gunicorn");
    }

    #[test]
    fn exec_of_missing_program_returns_error() {
        let launch = Launch::new(vec!["/nonexistent/entrypoint-target".into()]).unwrap();

        match launch.exec() {
            Err(HandoffError::Exec { program, source }) => {
                assert_eq!(program, "/nonexistent/entrypoint-target");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
