//! Container entrypoint library.
//!
//! Gates startup of an application process on its database and message
//! broker, runs one-time initialization for the web server commands, then
//! replaces itself with the target command.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod init;
pub mod lifecycle;
pub mod observability;
pub mod readiness;

pub use config::schema::EntrypointConfig;
pub use dispatch::Sequencer;
pub use error::EntrypointError;
pub use lifecycle::Launch;
