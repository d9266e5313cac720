// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policy CRUD and expiry-window queries.

use chrono::{Duration, NaiveDate};
use myremind_core::{
    NewPolicy, Policy, PolicyFilter, PolicyId, PolicyPatch, Priority, ReminderCadence, UserId,
};
use myremind_core::RemindError;
use rusqlite::params;

use crate::database::Database;

const POLICY_COLUMNS: &str = "id, owner_id, customer_name, phone, date_of_birth, national_id, \
     policy_code, address, expiry_date, payment_amount, status, priority, \
     reminder_cadence, notes, created_at";

fn policy_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Policy> {
    let priority: String = row.get(11)?;
    let cadence: String = row.get(12)?;
    Ok(Policy {
        id: PolicyId(row.get(0)?),
        owner: row.get::<_, Option<String>>(1)?.map(UserId),
        customer_name: row.get(2)?,
        phone: row.get(3)?,
        date_of_birth: row.get(4)?,
        national_id: row.get(5)?,
        policy_code: row.get(6)?,
        address: row.get(7)?,
        expiry_date: row.get(8)?,
        payment_amount: row.get(9)?,
        status: row.get(10)?,
        // Stored enum values fall back to defaults rather than poisoning reads.
        priority: priority.parse().unwrap_or(Priority::Normal),
        reminder_cadence: ReminderCadence::parse_or_default(&cadence),
        notes: row.get(13)?,
        created_at: row.get(14)?,
    })
}

/// Insert a validated policy and return the stored row.
pub async fn insert(db: &Database, new: &NewPolicy) -> Result<Policy, RemindError> {
    let new = new.clone();
    let id = uuid::Uuid::new_v4().to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO policies (id, owner_id, customer_name, phone, date_of_birth,
                     national_id, policy_code, address, expiry_date, payment_amount,
                     status, priority, reminder_cadence, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, ?11, ?12, ?13)",
                params![
                    id,
                    new.owner.0,
                    new.customer_name,
                    new.phone,
                    new.date_of_birth,
                    new.national_id,
                    new.policy_code,
                    new.address,
                    new.expiry_date,
                    new.payment_amount,
                    new.priority.to_string(),
                    new.reminder_cadence.to_string(),
                    new.notes,
                ],
            )?;
            let policy = conn.query_row(
                &format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = ?1"),
                params![id],
                policy_from_row,
            )?;
            Ok(policy)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch a policy by id.
pub async fn get(db: &Database, id: &PolicyId) -> Result<Option<Policy>, RemindError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = ?1"),
                params![id],
                policy_from_row,
            );
            match result {
                Ok(policy) => Ok(Some(policy)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List an owner's policies ascending by expiry date, optionally restricted
/// to not-yet-renewed policies expiring within `[today, today + N days]`.
pub async fn list(
    db: &Database,
    owner: &UserId,
    filter: &PolicyFilter,
    today: NaiveDate,
) -> Result<Vec<Policy>, RemindError> {
    let owner = owner.0.clone();
    let window_days = filter.expiring_within_days;
    db.connection()
        .call(move |conn| {
            let mut policies = Vec::new();
            match window_days {
                Some(days) => {
                    let until = today + Duration::days(days);
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {POLICY_COLUMNS} FROM policies
                         WHERE owner_id = ?1
                           AND expiry_date BETWEEN ?2 AND ?3
                           AND status = 0
                         ORDER BY expiry_date ASC"
                    ))?;
                    let rows = stmt.query_map(params![owner, today, until], policy_from_row)?;
                    for row in rows {
                        policies.push(row?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {POLICY_COLUMNS} FROM policies
                         WHERE owner_id = ?1
                         ORDER BY expiry_date ASC"
                    ))?;
                    let rows = stmt.query_map(params![owner], policy_from_row)?;
                    for row in rows {
                        policies.push(row?);
                    }
                }
            }
            Ok(policies)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Merge a partial patch onto an existing row inside one transaction.
///
/// Returns `None` when the id is absent; the adapter maps that to `NotFound`.
pub async fn update(
    db: &Database,
    id: &PolicyId,
    patch: &PolicyPatch,
) -> Result<Option<Policy>, RemindError> {
    let id = id.0.clone();
    let patch = patch.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let existing = {
                let result = tx.query_row(
                    &format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = ?1"),
                    params![id],
                    policy_from_row,
                );
                match result {
                    Ok(policy) => policy,
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        tx.commit()?;
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            // Fields not supplied keep their current values.
            let customer_name = patch.customer_name.unwrap_or(existing.customer_name);
            let phone = patch.phone.unwrap_or(existing.phone);
            let date_of_birth = patch.date_of_birth.or(existing.date_of_birth);
            let national_id = patch.national_id.or(existing.national_id);
            let policy_code = patch.policy_code.or(existing.policy_code);
            let address = patch.address.or(existing.address);
            let expiry_date = patch.expiry_date.unwrap_or(existing.expiry_date);
            let payment_amount = patch.payment_amount.or(existing.payment_amount);
            let status = patch.status.unwrap_or(existing.status);
            let priority = patch.priority.unwrap_or(existing.priority);
            let cadence = patch.reminder_cadence.unwrap_or(existing.reminder_cadence);
            let notes = patch.notes.or(existing.notes);

            tx.execute(
                "UPDATE policies SET customer_name = ?1, phone = ?2, date_of_birth = ?3,
                     national_id = ?4, policy_code = ?5, address = ?6, expiry_date = ?7,
                     payment_amount = ?8, status = ?9, priority = ?10,
                     reminder_cadence = ?11, notes = ?12
                 WHERE id = ?13",
                params![
                    customer_name,
                    phone,
                    date_of_birth,
                    national_id,
                    policy_code,
                    address,
                    expiry_date,
                    payment_amount,
                    status,
                    priority.to_string(),
                    cadence.to_string(),
                    notes,
                    id,
                ],
            )?;

            let updated = tx.query_row(
                &format!("SELECT {POLICY_COLUMNS} FROM policies WHERE id = ?1"),
                params![id],
                policy_from_row,
            )?;
            tx.commit()?;
            Ok(Some(updated))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a policy. Returns whether a row was removed.
pub async fn delete(db: &Database, id: &PolicyId) -> Result<bool, RemindError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let removed = conn.execute("DELETE FROM policies WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recent row matching (owner, customer_name, expiry_date) created
/// within the last `within_secs` seconds.
pub async fn find_recent_duplicate(
    db: &Database,
    owner: &UserId,
    customer_name: &str,
    expiry_date: NaiveDate,
    within_secs: i64,
) -> Result<Option<Policy>, RemindError> {
    let owner = owner.0.clone();
    let customer_name = customer_name.to_string();
    let cutoff = crate::database::cutoff_timestamp(within_secs);
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!(
                    "SELECT {POLICY_COLUMNS} FROM policies
                     WHERE owner_id = ?1
                       AND customer_name = ?2
                       AND expiry_date = ?3
                       AND created_at > ?4
                     ORDER BY created_at DESC
                     LIMIT 1"
                ),
                params![owner, customer_name, expiry_date, cutoff],
                policy_from_row,
            );
            match result {
                Ok(policy) => Ok(Some(policy)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
