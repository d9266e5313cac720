// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web-push subscription queries.

use myremind_core::{PushSubscription, RemindError, UserId};
use rusqlite::params;

use crate::database::Database;

fn subscription_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PushSubscription> {
    Ok(PushSubscription {
        endpoint: row.get(0)?,
        user_id: UserId(row.get(1)?),
        p256dh: row.get(2)?,
        auth: row.get(3)?,
    })
}

/// All subscriptions registered by a user's browsers.
pub async fn list_for_user(
    db: &Database,
    user: &UserId,
) -> Result<Vec<PushSubscription>, RemindError> {
    let user = user.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT endpoint, user_id, p256dh, auth FROM push_subscriptions
                 WHERE user_id = ?1 ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map(params![user], subscription_from_row)?;
            let mut subs = Vec::new();
            for row in rows {
                subs.push(row?);
            }
            Ok(subs)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or refresh a subscription keyed by its endpoint URL.
pub async fn upsert(db: &Database, sub: &PushSubscription) -> Result<(), RemindError> {
    let sub = sub.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO push_subscriptions (endpoint, user_id, p256dh, auth)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(endpoint) DO UPDATE SET
                     user_id = excluded.user_id,
                     p256dh = excluded.p256dh,
                     auth = excluded.auth",
                params![sub.endpoint, sub.user_id.0, sub.p256dh, sub.auth],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Drop a subscription whose endpoint signaled a permanent failure.
pub async fn delete_by_endpoint(db: &Database, endpoint: &str) -> Result<(), RemindError> {
    let endpoint = endpoint.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM push_subscriptions WHERE endpoint = ?1",
                params![endpoint],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use myremind_core::NewUser;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, UserId, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        let user = crate::queries::users::insert(
            &db,
            &NewUser {
                email: "owner@example.com".into(),
                name: "Owner".into(),
            },
        )
        .await
        .unwrap();
        (db, user.id, dir)
    }

    fn make_sub(user: &UserId, endpoint: &str) -> PushSubscription {
        PushSubscription {
            endpoint: endpoint.to_string(),
            user_id: user.clone(),
            p256dh: "key-material".to_string(),
            auth: "auth-secret".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_is_idempotent_per_endpoint() {
        let (db, user, _dir) = setup_db().await;
        let sub = make_sub(&user, "https://push.example/ep-1");

        upsert(&db, &sub).await.unwrap();
        upsert(&db, &sub).await.unwrap();

        let subs = list_for_user(&db, &user).await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].endpoint, "https://push.example/ep-1");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_endpoint_prunes() {
        let (db, user, _dir) = setup_db().await;
        upsert(&db, &make_sub(&user, "https://push.example/ep-1")).await.unwrap();
        upsert(&db, &make_sub(&user, "https://push.example/ep-2")).await.unwrap();

        delete_by_endpoint(&db, "https://push.example/ep-1").await.unwrap();

        let subs = list_for_user(&db, &user).await.unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].endpoint, "https://push.example/ep-2");

        db.close().await.unwrap();
    }
}
