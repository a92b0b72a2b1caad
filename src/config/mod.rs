//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize, fall back to defaults)
//!     → loader.rs (ENTRYPOINT_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → EntrypointConfig (validated, immutable)
//!     → borrowed by the sequencer for the whole run
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the process lives only until exec
//! - All fields have defaults so no file reproduces the stock container
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    CommandsConfig, EntrypointConfig, InitConfig, LogFormat, ObservabilityConfig,
    ReadinessConfig, ServiceTarget, SetupScript,
};
pub use validation::ValidationError;
