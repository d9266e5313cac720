// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The caller-facing notification inbox.

use std::sync::Arc;

use myremind_core::{
    AuthContext, CurrentUser, Notification, NotificationId, NotificationStore, RemindError,
};

/// How many notifications `list` returns at most.
const INBOX_LIMIT: i64 = 50;

/// Owner-scoped read access and read-flag updates over notifications.
pub struct InboxService {
    notifications: Arc<dyn NotificationStore>,
    auth: Arc<dyn AuthContext>,
}

impl InboxService {
    pub fn new(notifications: Arc<dyn NotificationStore>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            notifications,
            auth,
        }
    }

    async fn require_user(&self) -> Result<CurrentUser, RemindError> {
        self.auth
            .current_user()
            .await
            .ok_or(RemindError::NotAuthenticated)
    }

    /// The caller's notifications, most recent first, bounded to the last 50.
    pub async fn list(&self) -> Result<Vec<Notification>, RemindError> {
        let user = self.require_user().await?;
        self.notifications.list_recent(&user.id, INBOX_LIMIT).await
    }

    /// Mark one notification read. `NotFound` covers both an absent id and
    /// an id owned by someone else.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), RemindError> {
        let user = self.require_user().await?;
        let changed = self.notifications.mark_read(&user.id, id).await?;
        if changed == 0 {
            return Err(RemindError::NotFound(format!("notification {}", id.0)));
        }
        Ok(())
    }

    /// Mark everything unread as read. Returns how many rows changed.
    pub async fn mark_all_read(&self) -> Result<u64, RemindError> {
        let user = self.require_user().await?;
        self.notifications.mark_all_read(&user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myremind_config::model::StorageConfig;
    use myremind_core::{NewNotification, NewUser, NotificationKind, UserId, UserStore};
    use myremind_storage::SqliteStorage;
    use myremind_test_utils::StaticAuth;
    use tempfile::tempdir;

    async fn setup() -> (Arc<SqliteStorage>, UserId, InboxService, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("inbox.db").to_str().unwrap().to_string(),
            wal_mode: true,
        };
        let storage = Arc::new(SqliteStorage::open(&config).await.unwrap());
        let user = UserStore::insert(
            storage.as_ref(),
            &NewUser {
                email: "an@example.com".into(),
                name: "An".into(),
            },
        )
        .await
        .unwrap();
        let inbox = InboxService::new(
            storage.clone(),
            Arc::new(StaticAuth::signed_in(user.id.0.clone(), user.email, user.name)),
        );
        (storage, user.id, inbox, dir)
    }

    async fn add_notice(storage: &SqliteStorage, owner: &UserId, title: &str) {
        use myremind_core::NotificationStore;
        NotificationStore::insert(
            storage,
            &NewNotification {
                owner: owner.clone(),
                policy_id: None,
                title: title.into(),
                message: "nội dung".into(),
                kind: NotificationKind::Info,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn list_and_mark_read() {
        let (storage, owner, inbox, _dir) = setup().await;
        add_notice(&storage, &owner, "Thông báo 1").await;

        let listed = inbox.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].read);

        inbox.mark_read(&listed[0].id).await.unwrap();
        assert!(inbox.list().await.unwrap()[0].read);

        // Already-read is a no-op, not an error.
        inbox.mark_read(&listed[0].id).await.unwrap();
    }

    #[tokio::test]
    async fn mark_read_unknown_id_is_not_found() {
        let (_storage, _owner, inbox, _dir) = setup().await;
        let err = inbox
            .mark_read(&NotificationId("ghost".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, RemindError::NotFound(_)));
    }

    #[tokio::test]
    async fn mark_all_read_reports_changed_rows() {
        let (storage, owner, inbox, _dir) = setup().await;
        add_notice(&storage, &owner, "Một").await;
        add_notice(&storage, &owner, "Hai").await;

        assert_eq!(inbox.mark_all_read().await.unwrap(), 2);
        assert_eq!(inbox.mark_all_read().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn strangers_rows_are_invisible() {
        let (storage, owner, _inbox, _dir) = setup().await;
        add_notice(&storage, &owner, "Riêng tư").await;

        let stranger = InboxService::new(
            storage.clone(),
            Arc::new(StaticAuth::signed_in("stranger", "s@example.com", "S")),
        );
        assert!(stranger.list().await.unwrap().is_empty());
    }
}
