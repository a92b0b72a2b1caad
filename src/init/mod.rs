//! Initialization subsystem.
//!
//! # Data Flow
//! ```text
//! InitMode (Production | Development)
//!     → sequence.rs: migrations (generate, apply)
//!     → sequence.rs: create data directory
//!     → sequence.rs: collect static assets (Production only)
//!     → sequence.rs: each setup script whose file exists
//!     → runner.rs: spawn with inherited stdio, wait for exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: the first non-zero exit aborts the sequence
//! - No output capture; children write straight to our stdout/stderr
//! - Script presence is checked immediately before each invocation
//! - Production and development stay separate modes rather than one merged flag

pub mod runner;
pub mod sequence;

pub use runner::{CommandRunner, Invocation, ProcessRunner, StepStatus};
pub use sequence::{InitError, InitMode, Initializer};
