//! Top-level error type and exit status mapping.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::init::InitError;
use crate::lifecycle::{HandoffError, Terminated};
use crate::readiness::ReadinessError;

/// Anything that stops the entrypoint before the target command runs.
#[derive(Debug, Error)]
pub enum EntrypointError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),

    #[error(transparent)]
    Terminated(#[from] Terminated),

    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] io::Error),
}

impl EntrypointError {
    /// Process exit status, following shell conventions.
    ///
    /// A failing initialization step passes its own exit code through.
    pub fn exit_code(&self) -> u8 {
        match self {
            EntrypointError::Config(_) => 2,
            EntrypointError::Readiness(_) => 1,
            EntrypointError::Init(err) => match err {
                InitError::Spawn { source, .. } => spawn_failure_code(source),
                InitError::StepFailed { code, .. } => u8::try_from(*code)
                    .ok()
                    .filter(|code| *code != 0)
                    .unwrap_or(1),
                InitError::Signaled { signal, .. } => signal_code(*signal),
                InitError::DataDir { .. } => 1,
            },
            EntrypointError::Handoff(err) => match err {
                HandoffError::EmptyCommand => 2,
                HandoffError::Exec { source, .. } => spawn_failure_code(source),
            },
            EntrypointError::Terminated(Terminated { signal }) => signal_code(*signal),
            EntrypointError::Signals(_) => 1,
        }
    }
}

fn spawn_failure_code(err: &io::Error) -> u8 {
    match err.kind() {
        io::ErrorKind::NotFound => 127,
        _ => 126,
    }
}

fn signal_code(signal: i32) -> u8 {
    u8::try_from(128 + signal).unwrap_or(1)
}
