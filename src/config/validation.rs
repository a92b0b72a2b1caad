//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0)
//! - Reject empty command vectors that could never be spawned
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EntrypointConfig → Result<(), Vec<ValidationError>>
//! - Service targets are not checked at all; a bad host or port just keeps the gate waiting

use thiserror::Error;

use crate::config::schema::EntrypointConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("readiness.{field} must be greater than 0")]
    ZeroDuration { field: &'static str },

    #[error("{field} must not be empty")]
    EmptyValue { field: String },
}

pub fn validate_config(config: &EntrypointConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.readiness.interval_secs == 0 {
        errors.push(ValidationError::ZeroDuration { field: "interval_secs" });
    }
    if config.readiness.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "connect_timeout_secs",
        });
    }

    let commands = &config.commands;
    for (field, value) in [
        ("commands.server", &commands.server),
        ("commands.interpreter", &commands.interpreter),
        ("commands.management_entry", &commands.management_entry),
        ("commands.dev_server", &commands.dev_server),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                field: field.to_string(),
            });
        }
    }
    for (i, name) in commands.broker_commands.iter().enumerate() {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyValue {
                field: format!("commands.broker_commands[{}]", i),
            });
        }
    }

    let init = &config.init;
    for (i, argv) in init.migrations.iter().enumerate() {
        check_argv(argv, format!("init.migrations[{}]", i), &mut errors);
    }
    check_argv(&init.collect_static, "init.collect_static".to_string(), &mut errors);
    if init.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyValue {
            field: "init.data_dir".to_string(),
        });
    }
    for (i, script) in init.setup_scripts.iter().enumerate() {
        if script.path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyValue {
                field: format!("init.setup_scripts[{}].path", i),
            });
        }
        check_argv(
            &script.runner,
            format!("init.setup_scripts[{}].runner", i),
            &mut errors,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_argv(argv: &[String], field: String, errors: &mut Vec<ValidationError>) {
    if argv.first().map_or(true, |program| program.trim().is_empty()) {
        errors.push(ValidationError::EmptyValue { field });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&EntrypointConfig::default()), Ok(()));
    }

    #[test]
    fn collects_every_error() {
        let mut config = EntrypointConfig::default();
        config.readiness.interval_secs = 0;
        config.readiness.connect_timeout_secs = 0;
        config.init.collect_static.clear();
        config.init.setup_scripts[1].runner = vec![String::new()];

        let errors = validate_config(&config).unwrap_err();

        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroDuration { field: "interval_secs" },
                ValidationError::ZeroDuration {
                    field: "connect_timeout_secs"
                },
                ValidationError::EmptyValue {
                    field: "init.collect_static".to_string()
                },
                ValidationError::EmptyValue {
                    field: "init.setup_scripts[1].runner".to_string()
                },
            ]
        );
    }

    #[test]
    fn service_targets_are_not_checked() {
        let mut config = EntrypointConfig::default();
        config.database.host = String::new();
        config.broker.port = 0;

        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn empty_migration_list_is_allowed() {
        let mut config = EntrypointConfig::default();
        config.init.migrations.clear();
        config.init.setup_scripts.clear();
        config.commands.broker_commands.clear();

        assert_eq!(validate_config(&config), Ok(()));
    }
}
