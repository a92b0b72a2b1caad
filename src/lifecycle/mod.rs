//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Install signal handlers → Gate → Initialize
//!
//! Handoff (handoff.rs):
//!     Launch::exec → execvp(argv) → target process owns PID and stdio
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT before handoff → abort with 128 + signo
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then gating, then initialization
//! - Handoff has no success return path (`Result<Infallible, _>`)
//! - No cleanup on abort; nothing the entrypoint creates needs undoing

pub mod handoff;
pub mod signals;

pub use handoff::{HandoffError, Launch};
pub use signals::{Terminated, TerminationSignals};
