// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `myremind status` command implementation.

use myremind_config::MyRemindConfig;
use myremind_core::{RemindError, UserStore};
use myremind_storage::SqliteStorage;

/// Open the configured database and report its health.
pub async fn run_status(config: &MyRemindConfig) -> Result<(), RemindError> {
    println!("app:        {}", config.app.name);
    println!("database:   {}", config.storage.database_path);
    println!(
        "push:       {}",
        if config.push.enabled { "enabled" } else { "disabled" }
    );
    println!(
        "email:      {}",
        if config.smtp.enabled { "enabled" } else { "disabled" }
    );

    let storage = SqliteStorage::open(&config.storage).await?;
    storage.health_check().await?;
    let users = storage.list().await?;
    println!("health:     ok ({} registered users)", users.len());
    storage.close().await?;
    Ok(())
}
