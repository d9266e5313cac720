// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock push and email sinks for deterministic testing.
//!
//! Both capture everything handed to `send()` for later assertion and can
//! be armed to fail the next dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use myremind_core::{DispatchOutcome, EmailSink, PushSink, UserId};

/// One captured push dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SentPush {
    pub user: UserId,
    pub title: String,
    pub body: String,
    pub metadata: Option<serde_json::Value>,
}

/// One captured email dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// A push sink that records dispatches instead of delivering them.
pub struct MockPushSink {
    sent: Arc<Mutex<Vec<SentPush>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockPushSink {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(false)),
        }
    }

    /// All dispatches captured so far.
    pub async fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().await.clone()
    }

    /// Count of captured dispatches.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Make the next `send()` report `Failed`.
    pub async fn fail_next(&self) {
        *self.fail_next.lock().await = true;
    }

    /// Drop all captured dispatches.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockPushSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushSink for MockPushSink {
    async fn send(
        &self,
        user: &UserId,
        title: &str,
        body: &str,
        metadata: Option<serde_json::Value>,
    ) -> DispatchOutcome {
        let mut fail = self.fail_next.lock().await;
        if *fail {
            *fail = false;
            return DispatchOutcome::Failed;
        }
        self.sent.lock().await.push(SentPush {
            user: user.clone(),
            title: title.to_string(),
            body: body.to_string(),
            metadata,
        });
        DispatchOutcome::Sent
    }
}

/// An email sink that records dispatches instead of delivering them.
pub struct MockEmailSink {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl MockEmailSink {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(false)),
        }
    }

    /// All dispatches captured so far.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    /// Count of captured dispatches.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Make the next `send()` report `Failed`.
    pub async fn fail_next(&self) {
        *self.fail_next.lock().await = true;
    }
}

impl Default for MockEmailSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailSink for MockEmailSink {
    async fn send(&self, to: &str, subject: &str, html: &str) -> DispatchOutcome {
        let mut fail = self.fail_next.lock().await;
        if *fail {
            *fail = false;
            return DispatchOutcome::Failed;
        }
        self.sent.lock().await.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        DispatchOutcome::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn push_sink_captures_dispatches() {
        let sink = MockPushSink::new();
        let outcome = sink
            .send(&UserId("u-1".into()), "title", "body", None)
            .await;
        assert!(outcome.is_sent());

        let sent = sink.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "title");

        sink.clear_sent().await;
        assert_eq!(sink.sent_count().await, 0);
    }

    #[tokio::test]
    async fn fail_next_is_one_shot() {
        let sink = MockEmailSink::new();
        sink.fail_next().await;

        let first = sink.send("a@example.com", "s", "<p>h</p>").await;
        assert!(!first.is_sent());
        assert_eq!(sink.sent_count().await, 0);

        let second = sink.send("a@example.com", "s", "<p>h</p>").await;
        assert!(second.is_sent());
        assert_eq!(sink.sent_count().await, 1);
    }
}
