// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Owner-scoped policy operations, including the deduplicating create.
//!
//! Create serializes per dedup key: hash(owner, customer_name, expiry_date,
//! policy type). While the key's lock is held, a row created within the last
//! 30 seconds is returned instead of inserting, so a double-click or retried
//! request converges on one stored row. A uniqueness race the in-process
//! lock cannot see (another instance) is absorbed by re-querying a 15 second
//! window after a `Conflict`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sha1::{Digest, Sha1};
use tracing::{debug, info};

use myremind_core::{
    AuthContext, CurrentUser, LockManager, NotificationStore, Policy, PolicyFilter, PolicyId,
    PolicyPatch, PolicyStore, RemindError,
};

use crate::validate::{self, PolicyDraft, PolicyPatchDraft};

/// The single supported policy type, part of the dedup key.
const POLICY_TYPE: &str = "y_te";
/// How far back a create looks for a duplicate while holding the lock.
const DEDUP_WINDOW_SECS: i64 = 30;
/// Narrower re-query window after losing an insert race.
const RACE_RECHECK_SECS: i64 = 15;

/// Policy CRUD bound to the calling user's identity.
pub struct PolicyService {
    policies: Arc<dyn PolicyStore>,
    notifications: Arc<dyn NotificationStore>,
    locks: Arc<dyn LockManager>,
    auth: Arc<dyn AuthContext>,
}

impl PolicyService {
    pub fn new(
        policies: Arc<dyn PolicyStore>,
        notifications: Arc<dyn NotificationStore>,
        locks: Arc<dyn LockManager>,
        auth: Arc<dyn AuthContext>,
    ) -> Self {
        Self {
            policies,
            notifications,
            locks,
            auth,
        }
    }

    async fn require_user(&self) -> Result<CurrentUser, RemindError> {
        self.auth
            .current_user()
            .await
            .ok_or(RemindError::NotAuthenticated)
    }

    /// Fetch a policy the caller owns. Absent rows and rows owned by someone
    /// else both surface as `NotFound`.
    async fn owned_policy(
        &self,
        user: &CurrentUser,
        id: &PolicyId,
    ) -> Result<Policy, RemindError> {
        match self.policies.get(id).await? {
            Some(policy) if policy.owner.as_ref() == Some(&user.id) => Ok(policy),
            _ => Err(RemindError::NotFound(format!("policy {}", id.0))),
        }
    }

    fn dedup_key(user: &CurrentUser, customer_name: &str, expiry_date: NaiveDate) -> String {
        let mut hasher = Sha1::new();
        hasher.update(
            format!("{}:{}:{}:{}", user.id.0, customer_name, expiry_date, POLICY_TYPE).as_bytes(),
        );
        format!("policy-create:{}", hex::encode(hasher.finalize()))
    }

    /// Create a policy, converging rapid resubmits onto one stored row.
    pub async fn create(&self, draft: PolicyDraft) -> Result<Policy, RemindError> {
        let user = self.require_user().await?;
        let new = validate::validate_new(user.id.clone(), draft)?;

        let key = Self::dedup_key(&user, &new.customer_name, new.expiry_date);
        let _guard = self.locks.acquire(&key).await?;

        if let Some(existing) = self
            .policies
            .find_recent_duplicate(&user.id, &new.customer_name, new.expiry_date, DEDUP_WINDOW_SECS)
            .await?
        {
            debug!(policy = %existing.id.0, "returning recent duplicate instead of inserting");
            return Ok(existing);
        }

        match self.policies.insert(&new).await {
            Ok(policy) => {
                info!(policy = %policy.id.0, "policy created");
                Ok(policy)
            }
            Err(RemindError::Conflict(reason)) => {
                match self
                    .policies
                    .find_recent_duplicate(
                        &user.id,
                        &new.customer_name,
                        new.expiry_date,
                        RACE_RECHECK_SECS,
                    )
                    .await?
                {
                    Some(existing) => {
                        debug!(policy = %existing.id.0, "converged on row from a lost insert race");
                        Ok(existing)
                    }
                    None => Err(RemindError::Conflict(reason)),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// The caller's policies, ascending by expiry date.
    pub async fn list(&self, filter: PolicyFilter) -> Result<Vec<Policy>, RemindError> {
        let user = self.require_user().await?;
        self.policies
            .list(&user.id, &filter, Utc::now().date_naive())
            .await
    }

    /// Not-yet-renewed policies expiring within `days` of today.
    pub async fn expiring_soon(&self, days: i64) -> Result<Vec<Policy>, RemindError> {
        self.list(PolicyFilter {
            expiring_within_days: Some(days),
        })
        .await
    }

    pub async fn get(&self, id: &PolicyId) -> Result<Policy, RemindError> {
        let user = self.require_user().await?;
        self.owned_policy(&user, id).await
    }

    pub async fn update(
        &self,
        id: &PolicyId,
        draft: PolicyPatchDraft,
    ) -> Result<Policy, RemindError> {
        let user = self.require_user().await?;
        let patch = validate::validate_patch(draft)?;
        self.owned_policy(&user, id).await?;
        self.policies.update(id, &patch).await
    }

    /// Flip the renewed flag.
    pub async fn toggle_status(&self, id: &PolicyId) -> Result<Policy, RemindError> {
        let user = self.require_user().await?;
        let current = self.owned_policy(&user, id).await?;
        let patch = PolicyPatch {
            status: Some(!current.status),
            ..Default::default()
        };
        self.policies.update(id, &patch).await
    }

    /// Delete a policy and every notification referencing it.
    pub async fn delete(&self, id: &PolicyId) -> Result<(), RemindError> {
        let user = self.require_user().await?;
        self.owned_policy(&user, id).await?;
        let removed = self.notifications.delete_for_policy(id).await?;
        self.policies.delete(id).await?;
        info!(policy = %id.0, notifications_removed = removed, "policy deleted");
        Ok(())
    }
}
