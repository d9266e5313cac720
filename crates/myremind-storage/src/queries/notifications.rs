// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification persistence and inbox queries.
//!
//! The `idx_notifications_owner_policy_day` unique index backs the
//! at-most-one-per-day guarantee: a second scheduler insert for the same
//! (owner, policy, day) fails with `Conflict` instead of duplicating.

use chrono::NaiveDate;
use myremind_core::{
    NewNotification, Notification, NotificationId, NotificationKind, PolicyId, RemindError, UserId,
};
use rusqlite::params;

use crate::database::Database;

const NOTIFICATION_COLUMNS: &str =
    "id, owner_id, policy_id, title, message, kind, read, created_at";

fn notification_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Notification> {
    let kind: String = row.get(5)?;
    Ok(Notification {
        id: NotificationId(row.get(0)?),
        owner: UserId(row.get(1)?),
        policy_id: row.get::<_, Option<String>>(2)?.map(PolicyId),
        title: row.get(3)?,
        message: row.get(4)?,
        kind: kind.parse().unwrap_or(NotificationKind::Info),
        read: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Persist a notification and return the stored row.
pub async fn insert(db: &Database, new: &NewNotification) -> Result<Notification, RemindError> {
    let new = new.clone();
    let id = uuid::Uuid::new_v4().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO notifications (id, owner_id, policy_id, title, message, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    new.owner.0,
                    new.policy_id.as_ref().map(|p| p.0.clone()),
                    new.title,
                    new.message,
                    new.kind.to_string(),
                ],
            )?;
            let notification = conn.query_row(
                &format!("SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = ?1"),
                params![id],
                notification_from_row,
            )?;
            Ok(notification)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Whether a notification already exists for (owner, policy, `day`).
pub async fn exists_for_day(
    db: &Database,
    owner: &UserId,
    policy_id: &PolicyId,
    day: NaiveDate,
) -> Result<bool, RemindError> {
    let owner = owner.0.clone();
    let policy_id = policy_id.0.clone();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM notifications
                 WHERE owner_id = ?1 AND policy_id = ?2 AND date(created_at) = ?3",
                params![owner, policy_id, day],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// An owner's notifications, most recent first, bounded by `limit`.
pub async fn list_recent(
    db: &Database,
    owner: &UserId,
    limit: i64,
) -> Result<Vec<Notification>, RemindError> {
    let owner = owner.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {NOTIFICATION_COLUMNS} FROM notifications
                 WHERE owner_id = ?1
                 ORDER BY created_at DESC
                 LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![owner, limit], notification_from_row)?;
            let mut notifications = Vec::new();
            for row in rows {
                notifications.push(row?);
            }
            Ok(notifications)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark one owned notification read. Returns rows changed (0 when the id is
/// absent or belongs to a different owner).
pub async fn mark_read(
    db: &Database,
    owner: &UserId,
    id: &NotificationId,
) -> Result<u64, RemindError> {
    let owner = owner.0.clone();
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE notifications SET read = 1 WHERE id = ?1 AND owner_id = ?2",
                params![id, owner],
            )?;
            Ok(changed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark all of an owner's unread notifications read. Returns rows changed.
pub async fn mark_all_read(db: &Database, owner: &UserId) -> Result<u64, RemindError> {
    let owner = owner.0.clone();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE notifications SET read = 1 WHERE owner_id = ?1 AND read = 0",
                params![owner],
            )?;
            Ok(changed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove all notifications referencing a policy (delete cascade).
pub async fn delete_for_policy(db: &Database, policy_id: &PolicyId) -> Result<u64, RemindError> {
    let policy_id = policy_id.0.clone();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM notifications WHERE policy_id = ?1",
                params![policy_id],
            )?;
            Ok(removed as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
