//! Launch dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! argv
//!     → command.rs (classify against configured command names → LaunchPlan)
//!     → sequencer.rs: wait for database (always)
//!     → sequencer.rs: wait for broker (broker command set)
//!     → sequencer.rs: initialization (server / dev server forms)
//!     → Launch, exec'd by the caller
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function so the decision table is tested alone
//! - Readiness strictly precedes initialization, which precedes handoff
//! - Each container start begins from the first step; nothing is resumed

pub mod command;
pub mod sequencer;

pub use command::{classify, LaunchPlan};
pub use sequencer::Sequencer;
