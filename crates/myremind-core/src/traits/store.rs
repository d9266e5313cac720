// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository traits hiding the query language from the core logic.
//!
//! The scheduler and service layers depend only on these interfaces;
//! `myremind-storage` provides the SQLite implementation and tests may
//! substitute in-memory fakes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RemindError;
use crate::types::{
    NewNotification, NewPolicy, NewUser, Notification, NotificationId, Policy, PolicyFilter,
    PolicyId, PolicyPatch, PushSubscription, User, UserId,
};

/// CRUD over policy records, queryable by owner and expiry window.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// List an owner's policies ascending by expiry date. `today` anchors the
    /// optional expiring-soon window in the filter.
    async fn list(
        &self,
        owner: &UserId,
        filter: &PolicyFilter,
        today: NaiveDate,
    ) -> Result<Vec<Policy>, RemindError>;

    /// Fetch a single policy. Ownership is the caller's concern.
    async fn get(&self, id: &PolicyId) -> Result<Option<Policy>, RemindError>;

    /// Insert a validated policy and return the stored row, including the
    /// generated id and created_at.
    async fn insert(&self, new: &NewPolicy) -> Result<Policy, RemindError>;

    /// Merge a partial patch onto an existing row. Fails with `NotFound` if
    /// the id is absent.
    async fn update(&self, id: &PolicyId, patch: &PolicyPatch) -> Result<Policy, RemindError>;

    /// Delete a policy. Fails with `NotFound` if the id is absent.
    async fn delete(&self, id: &PolicyId) -> Result<(), RemindError>;

    /// Find the most recent row matching (owner, customer_name, expiry_date)
    /// created within the last `within_secs` seconds. Supports the
    /// deduplicating-create protocol.
    async fn find_recent_duplicate(
        &self,
        owner: &UserId,
        customer_name: &str,
        expiry_date: NaiveDate,
        within_secs: i64,
    ) -> Result<Option<Policy>, RemindError>;
}

/// Persistence for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification and return the stored row.
    ///
    /// The store enforces at most one scheduler notification per
    /// (owner, policy, calendar day); a second insert for the same triple on
    /// the same day fails with `Conflict`.
    async fn insert(&self, new: &NewNotification) -> Result<Notification, RemindError>;

    /// Whether a notification already exists for (owner, policy, `day`).
    async fn exists_for_day(
        &self,
        owner: &UserId,
        policy_id: &PolicyId,
        day: NaiveDate,
    ) -> Result<bool, RemindError>;

    /// An owner's notifications, most recent first, bounded by `limit`.
    async fn list_recent(&self, owner: &UserId, limit: i64)
        -> Result<Vec<Notification>, RemindError>;

    /// Flip `read` to true for one owned notification. Returns the number of
    /// rows changed (0 when the id is absent or owned by someone else).
    async fn mark_read(&self, owner: &UserId, id: &NotificationId) -> Result<u64, RemindError>;

    /// Flip `read` to true for all of an owner's unread notifications.
    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, RemindError>;

    /// Remove all notifications referencing a policy (delete cascade).
    async fn delete_for_policy(&self, policy_id: &PolicyId) -> Result<u64, RemindError>;
}

/// User account lookups for the daily scan and registration.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All registered users, in registration order.
    async fn list(&self) -> Result<Vec<User>, RemindError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RemindError>;

    /// Register a user. Fails with `Conflict` on a duplicate email.
    async fn insert(&self, new: &NewUser) -> Result<User, RemindError>;
}

/// Persistence for web-push subscription endpoints.
#[async_trait]
pub trait PushSubscriptionStore: Send + Sync {
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<PushSubscription>, RemindError>;

    /// Insert or refresh a subscription keyed by its endpoint URL.
    async fn upsert(&self, sub: &PushSubscription) -> Result<(), RemindError>;

    /// Drop a subscription whose endpoint signaled a permanent failure.
    async fn delete_by_endpoint(&self, endpoint: &str) -> Result<(), RemindError>;
}
