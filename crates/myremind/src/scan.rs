// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `myremind scan` command implementation.
//!
//! One invocation per day from an external trigger (cron). Re-running
//! within the same day creates no additional notifications.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use myremind_config::MyRemindConfig;
use myremind_core::{EmailSink, PushSink, RemindError};
use myremind_email::{DisabledEmailSink, SmtpEmailSink};
use myremind_push::{DisabledPushSink, WebPushSink};
use myremind_scheduler::{DailyScan, NotificationEmitter};
use myremind_storage::SqliteStorage;

/// Run the daily reminder scan. `date` overrides today for backfills and
/// rehearsals.
pub async fn run_scan(config: &MyRemindConfig, date: Option<&str>) -> Result<(), RemindError> {
    let today = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            RemindError::validation("date", format!("expected YYYY-MM-DD, got {raw:?}"))
        })?,
        None => Utc::now().date_naive(),
    };

    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);

    let push: Arc<dyn PushSink> = if config.push.enabled {
        Arc::new(WebPushSink::new(&config.push, storage.clone())?)
    } else {
        Arc::new(DisabledPushSink)
    };
    let email: Arc<dyn EmailSink> = if config.smtp.enabled {
        Arc::new(SmtpEmailSink::new(&config.smtp)?)
    } else {
        Arc::new(DisabledEmailSink)
    };

    let emitter = NotificationEmitter::new(storage.clone(), push, email, &config.app.base_url);
    let scan = DailyScan::new(storage.clone(), storage.clone(), emitter);

    info!(%today, "starting daily scan");
    let report = scan.run(today).await?;
    println!(
        "scan complete: {} users processed, {} failed, {} notifications created",
        report.users_processed, report.users_failed, report.notifications_created
    );

    storage.close().await?;
    Ok(())
}
