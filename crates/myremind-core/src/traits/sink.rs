// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound notification sinks (push, email).
//!
//! Sinks are best-effort: delivery failure is an outcome, not an error, and
//! must never abort the operation that triggered the dispatch. Persisted
//! notifications are the durable source of truth.

use async_trait::async_trait;

use crate::types::UserId;

/// The result of a single sink dispatch. Logged by the caller; never
/// propagated as an error across the scheduler boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    Failed,
}

impl DispatchOutcome {
    pub fn is_sent(self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }
}

/// Push delivery to a user's registered browser endpoints.
#[async_trait]
pub trait PushSink: Send + Sync {
    /// Deliver `title`/`body` to every subscription the user has registered.
    /// `metadata` rides along in the payload for client-side routing.
    /// Implementations drop endpoints that signal permanent failure.
    async fn send(
        &self,
        user: &UserId,
        title: &str,
        body: &str,
        metadata: Option<serde_json::Value>,
    ) -> DispatchOutcome;
}

/// Email delivery of the reminder digest.
#[async_trait]
pub trait EmailSink: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> DispatchOutcome;
}
