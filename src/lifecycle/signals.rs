//! OS signal handling while the entrypoint is still in charge.
//!
//! # Responsibilities
//! - Register SIGTERM and SIGINT handlers before gating starts
//! - Abort gating or initialization when either arrives
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - As PID 1 the kernel ignores unhandled SIGTERM, so a handler is required
//! - Exit status follows the shell convention: 128 + signal number
//! - After exec the dispositions reset and the target owns its signals

use std::future::Future;
use std::io;

use thiserror::Error;
use tokio::signal::unix::{signal, Signal, SignalKind};

const SIGINT: i32 = 2;
const SIGTERM: i32 = 15;

/// The run was cut short by a termination signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("terminated by signal {signal}")]
pub struct Terminated {
    pub signal: i32,
}

/// Listens for SIGTERM and SIGINT.
pub struct TerminationSignals {
    term: Signal,
    int: Signal,
}

impl TerminationSignals {
    pub fn install() -> io::Result<Self> {
        Ok(Self {
            term: signal(SignalKind::terminate())?,
            int: signal(SignalKind::interrupt())?,
        })
    }

    /// Resolves with the number of the first signal received.
    pub async fn recv(&mut self) -> i32 {
        tokio::select! {
            _ = self.term.recv() => SIGTERM,
            _ = self.int.recv() => SIGINT,
        }
    }

    /// Drive `work` to completion unless a termination signal arrives first.
    ///
    /// Dropping `work` on a signal also drops any child it was waiting on,
    /// which kills it.
    pub async fn guard<F: Future>(&mut self, work: F) -> Result<F::Output, Terminated> {
        tokio::select! {
            output = work => Ok(output),
            signo = self.recv() => {
                tracing::warn!(signal = signo, "Received termination signal, aborting startup");
                Err(Terminated { signal: signo })
            }
        }
    }
}
