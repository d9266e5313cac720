// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account queries.

use myremind_core::{NewUser, RemindError, User, UserId};
use rusqlite::params;

use crate::database::Database;

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId(row.get(0)?),
        email: row.get(1)?,
        name: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Register a new user. A duplicate email surfaces as `Conflict`.
pub async fn insert(db: &Database, new: &NewUser) -> Result<User, RemindError> {
    let new = new.clone();
    let id = uuid::Uuid::new_v4().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (id, email, name) VALUES (?1, ?2, ?3)",
                params![id, new.email, new.name],
            )?;
            let user = conn.query_row(
                "SELECT id, email, name, created_at FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )?;
            Ok(user)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All registered users, in registration order.
pub async fn list(db: &Database) -> Result<Vec<User>, RemindError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, name, created_at FROM users ORDER BY created_at ASC",
            )?;
            let rows = stmt.query_map([], user_from_row)?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a user by email.
pub async fn find_by_email(db: &Database, email: &str) -> Result<Option<User>, RemindError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, email, name, created_at FROM users WHERE email = ?1",
                params![email],
                user_from_row,
            );
            match result {
                Ok(user) => Ok(Some(user)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
