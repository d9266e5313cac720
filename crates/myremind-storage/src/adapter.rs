// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the core store traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use myremind_config::model::StorageConfig;
use myremind_core::{
    NewNotification, NewPolicy, NewUser, Notification, NotificationId, NotificationStore, Policy,
    PolicyFilter, PolicyId, PolicyPatch, PolicyStore, PushSubscription, PushSubscriptionStore,
    RemindError, User, UserId, UserStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage, implementing every repository trait the service
/// and scheduler layers depend on.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules.
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Open the configured database, running migrations if needed.
    pub async fn open(config: &StorageConfig) -> Result<Self, RemindError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite storage initialized");
        Ok(Self { db })
    }

    /// The underlying database handle, for health checks and raw queries.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Cheap liveness probe (`SELECT 1`).
    pub async fn health_check(&self) -> Result<(), RemindError> {
        self.db
            .connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), RemindError> {
        self.db.close().await
    }
}

#[async_trait]
impl PolicyStore for SqliteStorage {
    async fn list(
        &self,
        owner: &UserId,
        filter: &PolicyFilter,
        today: NaiveDate,
    ) -> Result<Vec<Policy>, RemindError> {
        queries::policies::list(&self.db, owner, filter, today).await
    }

    async fn get(&self, id: &PolicyId) -> Result<Option<Policy>, RemindError> {
        queries::policies::get(&self.db, id).await
    }

    async fn insert(&self, new: &NewPolicy) -> Result<Policy, RemindError> {
        queries::policies::insert(&self.db, new).await
    }

    async fn update(&self, id: &PolicyId, patch: &PolicyPatch) -> Result<Policy, RemindError> {
        queries::policies::update(&self.db, id, patch)
            .await?
            .ok_or_else(|| RemindError::NotFound(format!("policy {}", id.0)))
    }

    async fn delete(&self, id: &PolicyId) -> Result<(), RemindError> {
        if queries::policies::delete(&self.db, id).await? {
            Ok(())
        } else {
            Err(RemindError::NotFound(format!("policy {}", id.0)))
        }
    }

    async fn find_recent_duplicate(
        &self,
        owner: &UserId,
        customer_name: &str,
        expiry_date: NaiveDate,
        within_secs: i64,
    ) -> Result<Option<Policy>, RemindError> {
        queries::policies::find_recent_duplicate(
            &self.db,
            owner,
            customer_name,
            expiry_date,
            within_secs,
        )
        .await
    }
}

#[async_trait]
impl NotificationStore for SqliteStorage {
    async fn insert(&self, new: &NewNotification) -> Result<Notification, RemindError> {
        queries::notifications::insert(&self.db, new).await
    }

    async fn exists_for_day(
        &self,
        owner: &UserId,
        policy_id: &PolicyId,
        day: NaiveDate,
    ) -> Result<bool, RemindError> {
        queries::notifications::exists_for_day(&self.db, owner, policy_id, day).await
    }

    async fn list_recent(
        &self,
        owner: &UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, RemindError> {
        queries::notifications::list_recent(&self.db, owner, limit).await
    }

    async fn mark_read(&self, owner: &UserId, id: &NotificationId) -> Result<u64, RemindError> {
        queries::notifications::mark_read(&self.db, owner, id).await
    }

    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, RemindError> {
        queries::notifications::mark_all_read(&self.db, owner).await
    }

    async fn delete_for_policy(&self, policy_id: &PolicyId) -> Result<u64, RemindError> {
        queries::notifications::delete_for_policy(&self.db, policy_id).await
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn list(&self) -> Result<Vec<User>, RemindError> {
        queries::users::list(&self.db).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RemindError> {
        queries::users::find_by_email(&self.db, email).await
    }

    async fn insert(&self, new: &NewUser) -> Result<User, RemindError> {
        queries::users::insert(&self.db, new).await
    }
}

#[async_trait]
impl PushSubscriptionStore for SqliteStorage {
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<PushSubscription>, RemindError> {
        queries::subscriptions::list_for_user(&self.db, user).await
    }

    async fn upsert(&self, sub: &PushSubscription) -> Result<(), RemindError> {
        queries::subscriptions::upsert(&self.db, sub).await
    }

    async fn delete_by_endpoint(&self, endpoint: &str) -> Result<(), RemindError> {
        queries::subscriptions::delete_by_endpoint(&self.db, endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myremind_core::{Priority, ReminderCadence};
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn open_health_check_close() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("adapter.db");
        let storage = SqliteStorage::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        storage.health_check().await.unwrap();
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn full_policy_lifecycle_through_traits() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("lifecycle.db");
        let storage = SqliteStorage::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        let owner = UserStore::insert(
            &storage,
            &NewUser {
                email: "an@example.com".into(),
                name: "An".into(),
            },
        )
        .await
        .unwrap()
        .id;

        let policy = PolicyStore::insert(
            &storage,
            &NewPolicy {
                owner: owner.clone(),
                customer_name: "Nguyễn Văn An".into(),
                phone: "0901234567".into(),
                date_of_birth: None,
                national_id: None,
                policy_code: Some("BH-042".into()),
                address: None,
                expiry_date: "2027-05-01".parse().unwrap(),
                payment_amount: Some(800_000.0),
                priority: Priority::High,
                reminder_cadence: ReminderCadence::TwoWeeks,
                notes: None,
            },
        )
        .await
        .unwrap();

        let fetched = PolicyStore::get(&storage, &policy.id).await.unwrap().unwrap();
        assert_eq!(fetched.priority, Priority::High);

        let updated = PolicyStore::update(
            &storage,
            &policy.id,
            &PolicyPatch {
                status: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(updated.status);

        PolicyStore::delete(&storage, &policy.id).await.unwrap();
        let err = PolicyStore::delete(&storage, &policy.id).await.unwrap_err();
        assert!(matches!(err, RemindError::NotFound(_)));

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_policy_is_not_found() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("missing.db");
        let storage = SqliteStorage::open(&make_config(db_path.to_str().unwrap()))
            .await
            .unwrap();

        let err = PolicyStore::update(
            &storage,
            &PolicyId("ghost".into()),
            &PolicyPatch::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RemindError::NotFound(_)));

        storage.close().await.unwrap();
    }
}
