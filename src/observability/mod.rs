//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! gate / init / handoff produce:
//!     → tracing events with structured fields (service, attempt, step)
//!     → logging.rs subscriber (pretty or JSON) → stdout
//! ```
//!
//! # Design Decisions
//! - Status lines go to stdout alongside the children's own output
//! - RUST_LOG wins over the configured level when set
//! - No metrics; the process is gone once the target is exec'd

pub mod logging;

pub use logging::init_logging;
