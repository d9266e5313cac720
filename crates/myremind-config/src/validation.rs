// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects all errors rather than failing fast.

use crate::ConfigError;
use crate::model::MyRemindConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
pub fn validate_config(config: &MyRemindConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {LOG_LEVELS:?}, got `{}`",
                config.app.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.smtp.enabled {
        if config.smtp.host.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "smtp.host must not be empty when smtp.enabled = true".to_string(),
            });
        }
        if config.smtp.from.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "smtp.from must not be empty when smtp.enabled = true".to_string(),
            });
        } else if !config.smtp.from.contains('@') {
            errors.push(ConfigError::Validation {
                message: format!("smtp.from `{}` is not a valid address", config.smtp.from),
            });
        }
        if config.smtp.username.trim().is_empty() || config.smtp.password.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "smtp.username and smtp.password are required when smtp.enabled = true"
                    .to_string(),
            });
        }
    }

    if config.push.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "push.ttl_secs must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
