//! Fixed-interval readiness gate.

use std::num::NonZeroU32;
use std::time::Duration;

use thiserror::Error;
use tokio::time;

use crate::config::{ReadinessConfig, ServiceTarget};
use crate::readiness::probe::Connector;

/// How often, and how many times, to probe before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay after each failed attempt.
    pub interval: Duration,
    /// `None` retries forever.
    pub max_attempts: Option<NonZeroU32>,
}

impl RetryPolicy {
    pub fn forever(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    pub fn bounded(interval: Duration, max_attempts: NonZeroU32) -> Self {
        Self {
            interval,
            max_attempts: Some(max_attempts),
        }
    }

    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self {
            interval: config.interval(),
            max_attempts: config.attempt_limit(),
        }
    }

    fn is_last(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max.get())
    }
}

/// Errors that end a readiness wait.
#[derive(Debug, Error)]
pub enum ReadinessError {
    /// Only reachable with a bounded policy.
    #[error("{service} not reachable after {attempts} attempts")]
    Exhausted { service: String, attempts: u32 },
}

/// Blocks until a service accepts TCP connections.
#[derive(Debug, Clone)]
pub struct ReadinessGate<C> {
    connector: C,
    policy: RetryPolicy,
}

impl<C: Connector> ReadinessGate<C> {
    pub fn new(connector: C, policy: RetryPolicy) -> Self {
        Self { connector, policy }
    }

    /// Wait for `target`, returning the number of attempts it took.
    pub async fn wait(&self, target: &ServiceTarget) -> Result<u32, ReadinessError> {
        tracing::info!(
            service = %target.name,
            host = %target.host,
            port = target.port,
            "Waiting for service"
        );

        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);

            match self.connector.connect(target).await {
                Ok(()) => {
                    tracing::info!(
                        service = %target.name,
                        attempts = attempt,
                        "Service is available"
                    );
                    return Ok(attempt);
                }
                Err(e) if self.policy.is_last(attempt) => {
                    tracing::error!(
                        service = %target.name,
                        attempts = attempt,
                        error = %e,
                        "Service still unavailable, giving up"
                    );
                    return Err(ReadinessError::Exhausted {
                        service: target.name.clone(),
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        service = %target.name,
                        attempt,
                        error = %e,
                        retry_in_secs = self.policy.interval.as_secs(),
                        "Service unavailable, sleeping"
                    );
                    time::sleep(self.policy.interval).await;
                }
            }
        }
    }
}
