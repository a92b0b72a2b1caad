//! Readiness gating subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceTarget (name, host, port)
//!     → gate.rs (attempt loop, fixed interval)
//!     → probe.rs (one TCP connect, bounded by connect timeout)
//!     → success: one confirmation line, return attempt count
//!     → failure: warn, sleep interval, retry
//! ```
//!
//! # Design Decisions
//! - Fixed interval, no backoff or jitter
//! - Retries forever by default; orchestrators own the restart policy
//! - Connector is a trait so the loop is testable without a network

pub mod gate;
pub mod probe;

pub use gate::{ReadinessError, ReadinessGate, RetryPolicy};
pub use probe::{Connector, TcpConnector};
