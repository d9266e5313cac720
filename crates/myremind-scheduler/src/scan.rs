// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The externally triggered daily scan.
//!
//! Iterates all users, evaluates their policies and hands the due ones to
//! the emitter. One user's failure is logged and counted without aborting
//! the rest of the scan.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info, instrument};

use myremind_core::{PolicyFilter, PolicyStore, RemindError, User, UserStore};

use crate::emitter::NotificationEmitter;
use crate::schedule;

/// Outcome counters for one scan invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub users_processed: u64,
    pub users_failed: u64,
    pub notifications_created: u64,
}

/// Runs the reminder pipeline across all registered users.
pub struct DailyScan {
    users: Arc<dyn UserStore>,
    policies: Arc<dyn PolicyStore>,
    emitter: NotificationEmitter,
}

impl DailyScan {
    pub fn new(
        users: Arc<dyn UserStore>,
        policies: Arc<dyn PolicyStore>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            users,
            policies,
            emitter,
        }
    }

    /// Scan every user for `today`. Safe to invoke more than once per day;
    /// the emitter's per-day dedup makes re-runs no-ops.
    #[instrument(skip_all, fields(%today))]
    pub async fn run(&self, today: NaiveDate) -> Result<ScanReport, RemindError> {
        let users = self.users.list().await?;
        let mut report = ScanReport::default();

        for user in &users {
            match self.scan_user(user, today).await {
                Ok(created) => {
                    report.users_processed += 1;
                    report.notifications_created += created;
                }
                Err(err) => {
                    error!(user = %user.email, %err, "user scan failed, continuing");
                    report.users_failed += 1;
                }
            }
        }

        info!(
            users = report.users_processed,
            failed = report.users_failed,
            created = report.notifications_created,
            "daily scan finished"
        );
        Ok(report)
    }

    async fn scan_user(&self, user: &User, today: NaiveDate) -> Result<u64, RemindError> {
        let policies = self
            .policies
            .list(&user.id, &PolicyFilter::default(), today)
            .await?;
        let due = schedule::due_policies(&policies, today);
        if due.is_empty() {
            return Ok(0);
        }
        self.emitter.emit_for_user(user, &due, today).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};
    use myremind_config::model::StorageConfig;
    use myremind_core::{NewPolicy, NewUser, Priority, ReminderCadence, UserId};
    use myremind_storage::SqliteStorage;
    use myremind_test_utils::{MockEmailSink, MockPushSink};
    use tempfile::tempdir;

    async fn setup() -> (Arc<SqliteStorage>, Arc<MockPushSink>, DailyScan, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("scan.db").to_str().unwrap().to_string(),
            wal_mode: true,
        };
        let storage = Arc::new(SqliteStorage::open(&config).await.unwrap());
        let push = Arc::new(MockPushSink::new());
        let emitter = NotificationEmitter::new(
            storage.clone(),
            push.clone(),
            Arc::new(MockEmailSink::new()),
            "https://myremind.app",
        );
        let scan = DailyScan::new(storage.clone(), storage.clone(), emitter);
        (storage, push, scan, dir)
    }

    async fn add_user(storage: &SqliteStorage, email: &str) -> UserId {
        UserStore::insert(
            storage,
            &NewUser {
                email: email.into(),
                name: email.split('@').next().unwrap().into(),
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn add_policy(
        storage: &SqliteStorage,
        owner: &UserId,
        name: &str,
        expiry: chrono::NaiveDate,
        cadence: ReminderCadence,
    ) {
        PolicyStore::insert(
            storage,
            &NewPolicy {
                owner: owner.clone(),
                customer_name: name.into(),
                phone: String::new(),
                date_of_birth: None,
                national_id: None,
                policy_code: None,
                address: None,
                expiry_date: expiry,
                payment_amount: None,
                priority: Priority::Normal,
                reminder_cadence: cadence,
                notes: None,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn scan_covers_all_users_and_reruns_are_idempotent() {
        let (storage, push, scan, _dir) = setup().await;
        let today = Utc::now().date_naive();

        let an = add_user(&storage, "an@example.com").await;
        let binh = add_user(&storage, "binh@example.com").await;
        add_policy(&storage, &an, "An", today, ReminderCadence::OnDue).await;
        add_policy(&storage, &an, "An 2", today + Days::new(7), ReminderCadence::OneWeek).await;
        add_policy(&storage, &binh, "Bình", today + Days::new(90), ReminderCadence::OneWeek).await;

        let report = scan.run(today).await.unwrap();
        assert_eq!(report.users_processed, 2);
        assert_eq!(report.users_failed, 0);
        assert_eq!(report.notifications_created, 2);
        assert_eq!(push.sent_count().await, 1);

        let rerun = scan.run(today).await.unwrap();
        assert_eq!(rerun.notifications_created, 0);
        assert_eq!(push.sent_count().await, 1);
    }

    #[tokio::test]
    async fn renewed_policies_never_produce_notifications() {
        let (storage, _push, scan, _dir) = setup().await;
        let today = Utc::now().date_naive();

        let an = add_user(&storage, "an@example.com").await;
        add_policy(&storage, &an, "An", today, ReminderCadence::OnDue).await;

        use myremind_core::{PolicyFilter, PolicyPatch};
        let listed = PolicyStore::list(storage.as_ref(), &an, &PolicyFilter::default(), today)
            .await
            .unwrap();
        PolicyStore::update(
            storage.as_ref(),
            &listed[0].id,
            &PolicyPatch {
                status: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let report = scan.run(today).await.unwrap();
        assert_eq!(report.notifications_created, 0);
    }
}
