//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the entrypoint.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so that no file at all reproduces the stock
//! container behaviour.

use std::fmt;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the entrypoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EntrypointConfig {
    /// Relational database every launch waits for.
    pub database: ServiceTarget,

    /// Message broker waited for by the broker command set.
    pub broker: ServiceTarget,

    /// Readiness polling settings.
    pub readiness: ReadinessConfig,

    /// Command names that select each branch.
    pub commands: CommandsConfig,

    /// One-time initialization steps.
    pub init: InitConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl Default for EntrypointConfig {
    fn default() -> Self {
        Self {
            database: ServiceTarget::new("PostgreSQL", "db", 5432),
            broker: ServiceTarget::new("RabbitMQ", "rabbitmq", 5672),
            readiness: ReadinessConfig::default(),
            commands: CommandsConfig::default(),
            init: InitConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// A network dependency identified by host and port.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceTarget {
    /// Human-readable label used in log lines.
    pub name: String,

    /// Hostname or IP address. Not validated beyond being non-empty.
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ServiceTarget {
    pub fn new(name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
        }
    }

    /// `host:port` in the form accepted by `lookup_host`.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServiceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.host, self.port)
    }
}

/// Readiness polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Fixed delay between connect attempts in seconds.
    pub interval_secs: u64,

    /// Deadline for a single connect attempt in seconds.
    pub connect_timeout_secs: u64,

    /// Give up after this many attempts. 0 retries forever.
    pub max_attempts: u32,
}

impl ReadinessConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// `None` means unbounded.
    pub fn attempt_limit(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.max_attempts)
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            connect_timeout_secs: 5,
            max_attempts: 0,
        }
    }
}

/// Launch command names recognised by the dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// `argv[0]` values that also wait for the broker.
    pub broker_commands: Vec<String>,

    /// Production web server; runs the full initialization.
    pub server: String,

    /// Interpreter used for the development server form.
    pub interpreter: String,

    /// Management entry script passed to the interpreter.
    pub management_entry: String,

    /// Management subcommand that starts the development server.
    pub dev_server: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            broker_commands: vec![
                "celery".to_string(),
                "python".to_string(),
                "gunicorn".to_string(),
            ],
            server: "gunicorn".to_string(),
            interpreter: "python".to_string(),
            management_entry: "manage.py".to_string(),
            dev_server: "runserver".to_string(),
        }
    }
}

/// Initialization sequence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InitConfig {
    /// Directory every step runs in; relative paths below resolve against it.
    pub workdir: PathBuf,

    /// Migration commands, run in order (generate, then apply).
    pub migrations: Vec<Vec<String>>,

    /// Working directory of the embedded vector store.
    pub data_dir: PathBuf,

    /// Static asset collection command (production server only).
    pub collect_static: Vec<String>,

    /// Optional scripts, each run only if its file exists.
    pub setup_scripts: Vec<SetupScript>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            migrations: vec![
                argv(&["python", "manage.py", "makemigrations"]),
                argv(&["python", "manage.py", "migrate"]),
            ],
            data_dir: PathBuf::from("chroma_db"),
            collect_static: argv(&["python", "manage.py", "collectstatic", "--noinput"]),
            setup_scripts: vec![
                SetupScript::new("script_permissions"),
                SetupScript::new("script_populate"),
            ],
        }
    }
}

/// A setup script gated on the presence of its file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetupScript {
    /// Script file, relative to `init.workdir`.
    pub path: PathBuf,

    /// Program (and leading arguments) the path is appended to.
    #[serde(default = "default_runner")]
    pub runner: Vec<String>,
}

impl SetupScript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            runner: default_runner(),
        }
    }
}

fn default_runner() -> Vec<String> {
    vec!["sh".to_string()]
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
