// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns due policies into persisted notifications and dispatches one
//! aggregate summary per user through the push and email sinks.
//!
//! Persistence is the source of truth; sink failures are logged and never
//! unwind created notifications. Re-runs within a day are safe: the per-day
//! existence check plus the store's uniqueness constraint keep one
//! notification per (owner, policy, day).

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::{debug, info, warn};

use myremind_core::{
    DuePolicy, EmailSink, NewNotification, NotificationStore, PushSink, RemindError, User,
};

use crate::message;

/// Persists due-policy notifications and fans out summaries.
pub struct NotificationEmitter {
    notifications: Arc<dyn NotificationStore>,
    push: Arc<dyn PushSink>,
    email: Arc<dyn EmailSink>,
    base_url: String,
}

impl NotificationEmitter {
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        push: Arc<dyn PushSink>,
        email: Arc<dyn EmailSink>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            notifications,
            push,
            email,
            base_url: base_url.into(),
        }
    }

    /// Process one user's due policies for `today`. Returns how many
    /// notifications were newly created.
    pub async fn emit_for_user(
        &self,
        user: &User,
        due: &[DuePolicy],
        today: NaiveDate,
    ) -> Result<u64, RemindError> {
        let mut created: Vec<DuePolicy> = Vec::new();

        for item in due {
            if self
                .notifications
                .exists_for_day(&user.id, &item.policy.id, today)
                .await?
            {
                debug!(
                    policy = %item.policy.id.0,
                    "notification already exists for today, skipping"
                );
                continue;
            }

            let new = NewNotification {
                owner: user.id.clone(),
                policy_id: Some(item.policy.id.clone()),
                title: message::title_for(item.days_until_expiry),
                message: message::message_for(item),
                kind: message::kind_for(item.days_until_expiry),
            };
            match self.notifications.insert(&new).await {
                Ok(_) => created.push(item.clone()),
                // A concurrent run won the insert; the notification exists.
                Err(RemindError::Conflict(_)) => {
                    debug!(policy = %item.policy.id.0, "lost insert race, skipping");
                }
                Err(err) => return Err(err),
            }
        }

        if created.is_empty() {
            return Ok(0);
        }

        info!(
            user = %user.email,
            count = created.len(),
            "created reminder notifications"
        );
        self.dispatch_summary(user, &created).await;

        Ok(created.len() as u64)
    }

    async fn dispatch_summary(&self, user: &User, created: &[DuePolicy]) {
        let (title, body) = message::summary_for(created);
        let has_expired = created.iter().any(|d| d.days_until_expiry <= 0);
        let metadata = json!({
            "type": if has_expired { "warning" } else { "reminder" },
            "policy_ids": created
                .iter()
                .map(|d| d.policy.id.0.clone())
                .collect::<Vec<_>>(),
        });

        let outcome = self.push.send(&user.id, &title, &body, Some(metadata)).await;
        if !outcome.is_sent() {
            warn!(user = %user.email, "push summary dispatch failed");
        }

        let subject = message::digest_subject(created);
        let html = message::digest_html(&user.name, created, &self.base_url);
        let outcome = self.email.send(&user.email, &subject, &html).await;
        if !outcome.is_sent() {
            warn!(user = %user.email, "email digest dispatch failed");
        }
    }
}
