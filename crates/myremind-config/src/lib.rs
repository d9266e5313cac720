// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the MyRemind renewal reminder service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides via the `MYREMIND_` prefix.

pub mod loader;
pub mod model;
pub mod validation;

use thiserror::Error;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::MyRemindConfig;

/// Configuration load or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parse or type error from the figment layer.
    #[error("config parse error: {0}")]
    Parse(#[from] figment::Error),

    /// Semantic validation failure.
    #[error("config validation error: {message}")]
    Validation { message: String },
}

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid [`MyRemindConfig`] or the full list of errors.
pub fn load_and_validate() -> Result<MyRemindConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<MyRemindConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![ConfigError::Parse(err)]),
    }
}

/// Render config errors to stderr, one per line.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("myremind: {error}");
    }
}
