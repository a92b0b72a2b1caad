//! The entrypoint sequence: gate, initialize, hand back the launch.

use std::ffi::OsString;

use crate::config::EntrypointConfig;
use crate::dispatch::command::classify;
use crate::error::EntrypointError;
use crate::init::{CommandRunner, Initializer, ProcessRunner};
use crate::lifecycle::Launch;
use crate::readiness::{Connector, ReadinessGate, RetryPolicy, TcpConnector};

/// Runs every pre-launch step for one container start.
pub struct Sequencer<C, R> {
    config: EntrypointConfig,
    gate: ReadinessGate<C>,
    initializer: Initializer<R>,
}

impl Sequencer<TcpConnector, ProcessRunner> {
    /// Production wiring: real TCP probes and real child processes.
    pub fn from_config(config: EntrypointConfig) -> Self {
        let connector = TcpConnector::new(config.readiness.connect_timeout());
        let runner = ProcessRunner::new(config.init.workdir.clone());
        Self::new(config, connector, runner)
    }
}

impl<C: Connector, R: CommandRunner> Sequencer<C, R> {
    pub fn new(config: EntrypointConfig, connector: C, runner: R) -> Self {
        let gate = ReadinessGate::new(connector, RetryPolicy::from_config(&config.readiness));
        let initializer = Initializer::new(runner, config.init.clone());
        Self {
            config,
            gate,
            initializer,
        }
    }

    /// Wait for dependencies and run initialization for `argv`.
    ///
    /// Returns the untouched argv wrapped in a [`Launch`], ready for
    /// [`Launch::exec`]. The first failing step aborts the sequence.
    pub async fn prepare(&self, argv: Vec<OsString>) -> Result<Launch, EntrypointError> {
        let launch = Launch::new(argv)?;
        let plan = classify(launch.argv(), &self.config.commands);

        tracing::debug!(
            command = %launch.program().to_string_lossy(),
            wait_for_broker = plan.wait_for_broker,
            init = ?plan.init,
            "Launch plan"
        );

        self.gate.wait(&self.config.database).await?;

        if plan.wait_for_broker {
            self.gate.wait(&self.config.broker).await?;
        }

        for mode in plan.init {
            self.initializer.run(mode).await?;
        }

        Ok(launch)
    }
}
