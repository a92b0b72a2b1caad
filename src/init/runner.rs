//! External command execution for initialization steps.
//!
//! # Responsibilities
//! - Describe one external invocation (program + arguments)
//! - Spawn it in the configured working directory with inherited stdio
//! - Report how it ended, without capturing output

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::ExitStatus;

use tokio::process::Command;

/// One external command, as run by an initialization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Step label used in logs and errors.
    pub step: String,
    /// Program followed by its arguments. Never empty.
    pub argv: Vec<OsString>,
}

impl Invocation {
    pub fn new<I, S>(step: impl Into<String>, argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            step: step.into(),
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &OsStr {
        self.argv.first().map(OsString::as_os_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[OsString] {
        self.argv.get(1..).unwrap_or_default()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a finished step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Success,
    /// Non-zero exit code.
    Failed(i32),
    /// Killed by a signal.
    Signaled(i32),
}

impl From<ExitStatus> for StepStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(0) => StepStatus::Success,
            Some(code) => StepStatus::Failed(code),
            None => StepStatus::Signaled(status.signal().unwrap_or_default()),
        }
    }
}

/// Runs initialization commands to completion.
pub trait CommandRunner {
    /// `Err` only when the command could not be started.
    fn run(&self, invocation: &Invocation) -> impl Future<Output = io::Result<StepStatus>> + Send;
}

/// Spawns real child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    workdir: PathBuf,
}

impl ProcessRunner {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> impl Future<Output = io::Result<StepStatus>> + Send {
        let mut command = Command::new(invocation.program());
        command
            .args(invocation.args())
            .current_dir(&self.workdir)
            .kill_on_drop(true);

        async move {
            let status = command.status().await?;
            Ok(StepStatus::from(status))
        }
    }
}
