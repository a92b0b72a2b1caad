//! The one-time initialization sequence.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::InitConfig;
use crate::init::runner::{CommandRunner, Invocation, StepStatus};

/// Which launch form triggered initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    /// Production web server: includes static asset collection.
    Production,
    /// Development server: no static asset collection.
    Development,
}

impl InitMode {
    pub fn collects_static(self) -> bool {
        matches!(self, InitMode::Production)
    }
}

/// Errors that abort initialization.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("{step}: failed to start `{command}`: {source}")]
    Spawn {
        step: String,
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{step}: `{command}` exited with status {code}")]
    StepFailed {
        step: String,
        command: String,
        code: i32,
    },

    #[error("{step}: `{command}` killed by signal {signal}")]
    Signaled {
        step: String,
        command: String,
        signal: i32,
    },

    #[error("failed to create data directory {}: {source}", .path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs the initialization steps in order, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct Initializer<R> {
    runner: R,
    config: InitConfig,
}

impl<R: CommandRunner> Initializer<R> {
    pub fn new(runner: R, config: InitConfig) -> Self {
        Self { runner, config }
    }

    pub async fn run(&self, mode: InitMode) -> Result<(), InitError> {
        tracing::info!(?mode, workdir = %self.config.workdir.display(), "Running initialization");

        for argv in &self.config.migrations {
            self.step(Invocation::new("migrations", argv)).await?;
        }

        self.ensure_data_dir().await?;

        if mode.collects_static() {
            self.step(Invocation::new("collect-static", &self.config.collect_static))
                .await?;
        }

        for script in &self.config.setup_scripts {
            let path = self.config.workdir.join(&script.path);
            // Checked right before use; an earlier step may have created it.
            if !is_file(&path).await {
                tracing::debug!(
                    script = %script.path.display(),
                    "Setup script not present, skipping"
                );
                continue;
            }

            let argv = script
                .runner
                .iter()
                .map(OsString::from)
                .chain(std::iter::once(script.path.clone().into_os_string()));
            self.step(Invocation::new("setup-script", argv)).await?;
        }

        tracing::info!(?mode, "Initialization complete");
        Ok(())
    }

    async fn ensure_data_dir(&self) -> Result<(), InitError> {
        let path = self.config.workdir.join(&self.config.data_dir);
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| InitError::DataDir {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "Data directory ready");
        Ok(())
    }

    async fn step(&self, invocation: Invocation) -> Result<(), InitError> {
        tracing::info!(step = %invocation.step, command = %invocation, "Running step");

        let status = self
            .runner
            .run(&invocation)
            .await
            .map_err(|source| InitError::Spawn {
                step: invocation.step.clone(),
                command: invocation.to_string(),
                source,
            })?;

        match status {
            StepStatus::Success => Ok(()),
            StepStatus::Failed(code) => Err(InitError::StepFailed {
                step: invocation.step.clone(),
                command: invocation.to_string(),
                code,
            }),
            StepStatus::Signaled(signal) => Err(InitError::Signaled {
                step: invocation.step.clone(),
                command: invocation.to_string(),
                signal,
            }),
        }
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}
