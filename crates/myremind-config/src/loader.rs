// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./myremind.toml` > `~/.config/myremind/myremind.toml`
//! > `/etc/myremind/myremind.toml`, with environment variable overrides via
//! the `MYREMIND_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MyRemindConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/myremind/myremind.toml` (system-wide)
/// 3. `~/.config/myremind/myremind.toml` (user XDG config)
/// 4. `./myremind.toml` (local directory)
/// 5. `MYREMIND_*` environment variables
pub fn load_config() -> Result<MyRemindConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MyRemindConfig::default()))
        .merge(Toml::file("/etc/myremind/myremind.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("myremind/myremind.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("myremind.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<MyRemindConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MyRemindConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MyRemindConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MyRemindConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MYREMIND_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("MYREMIND_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("smtp_", "smtp.", 1)
            .replacen("push_", "push.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.app.name, "MyRemind");
        assert_eq!(config.storage.database_path, "myremind.db");
        assert!(config.storage.wal_mode);
        assert!(!config.smtp.enabled);
        assert!(config.push.enabled);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [storage]
            database_path = "/var/lib/myremind/data.db"

            [smtp]
            enabled = true
            host = "smtp.example.com"
            username = "reminders"
            password = "hunter2"
            from = "noreply@example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.database_path, "/var/lib/myremind/data.db");
        assert!(config.smtp.enabled);
        assert_eq!(config.smtp.host, "smtp.example.com");
        assert_eq!(config.smtp.port, 587);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [storage]
            databse_path = "typo.db"
            "#,
        );
        assert!(result.is_err(), "typo'd key should be rejected");
    }
}
