//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{EntrypointConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_DB_HOST: &str = "ENTRYPOINT_DB_HOST";
pub const ENV_DB_PORT: &str = "ENTRYPOINT_DB_PORT";
pub const ENV_BROKER_HOST: &str = "ENTRYPOINT_BROKER_HOST";
pub const ENV_BROKER_PORT: &str = "ENTRYPOINT_BROKER_PORT";
pub const ENV_RETRY_INTERVAL_SECS: &str = "ENTRYPOINT_RETRY_INTERVAL_SECS";
pub const ENV_MAX_ATTEMPTS: &str = "ENTRYPOINT_MAX_ATTEMPTS";
pub const ENV_LOG_FORMAT: &str = "ENTRYPOINT_LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
///
/// Without a file the built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<EntrypointConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<EntrypointConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => EntrypointConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay `ENTRYPOINT_*` variables onto a loaded configuration.
pub fn apply_env_overrides<F>(config: &mut EntrypointConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = env(ENV_DB_HOST) {
        config.database.host = host;
    }
    if let Some(port) = parse_env(&env, ENV_DB_PORT)? {
        config.database.port = port;
    }
    if let Some(host) = env(ENV_BROKER_HOST) {
        config.broker.host = host;
    }
    if let Some(port) = parse_env(&env, ENV_BROKER_PORT)? {
        config.broker.port = port;
    }
    if let Some(secs) = parse_env(&env, ENV_RETRY_INTERVAL_SECS)? {
        config.readiness.interval_secs = secs;
    }
    if let Some(attempts) = parse_env(&env, ENV_MAX_ATTEMPTS)? {
        config.readiness.max_attempts = attempts;
    }
    if let Some(format) = parse_env::<LogFormat, _>(&env, ENV_LOG_FORMAT)? {
        config.observability.log_format = format;
    }
    Ok(())
}

fn parse_env<T, F>(env: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(var) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn no_file_no_env_gives_defaults() {
        let config = load_config_with(None, env_from(&[])).unwrap();
        assert_eq!(config.database.authority(), "db:5432");
        assert_eq!(config.broker.authority(), "rabbitmq:5672");
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nname = \"pg\"\nhost = \"from-file\"\nport = 5433\n\n[readiness]\nmax_attempts = 3"
        )
        .unwrap();

        let config = load_config_with(
            Some(file.path()),
            env_from(&[
                (ENV_DB_HOST, "from-env"),
                (ENV_BROKER_PORT, "5673"),
                (ENV_RETRY_INTERVAL_SECS, "1"),
                (ENV_LOG_FORMAT, "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.database.host, "from-env");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.broker.port, 5673);
        assert_eq!(config.readiness.interval_secs, 1);
        assert_eq!(config.readiness.max_attempts, 3);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_env_value_is_reported() {
        let err = load_config_with(None, env_from(&[(ENV_DB_PORT, "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_DB_PORT, .. }));
        assert_eq!(err.to_string(), "Invalid value for ENTRYPOINT_DB_PORT: 'postgres'");
    }

    #[test]
    fn invalid_values_fail_validation() {
        let err = load_config_with(None, env_from(&[(ENV_RETRY_INTERVAL_SECS, "0")])).unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn odd_service_targets_load_unchanged() {
        let config =
            load_config_with(None, env_from(&[(ENV_DB_HOST, ""), (ENV_DB_PORT, "0")])).unwrap();

        assert_eq!(config.database.host, "");
        assert_eq!(config.database.port, 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config_with(Some(Path::new("/nonexistent/entrypoint.toml")), env_from(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[readiness]\ninterval_secs = \"ten\"").unwrap();

        let err = load_config_with(Some(file.path()), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
