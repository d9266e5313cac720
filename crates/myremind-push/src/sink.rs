// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`PushSink`] implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, warn};

use myremind_config::model::PushConfig;
use myremind_core::{DispatchOutcome, PushSink, PushSubscriptionStore, RemindError, UserId};

/// Dispatches payloads to every push endpoint a user has registered.
///
/// The outcome is `Sent` when at least one endpoint accepted the payload.
/// Endpoints answering 404 or 410 are deleted from the subscription store.
pub struct WebPushSink {
    client: reqwest::Client,
    subscriptions: Arc<dyn PushSubscriptionStore>,
    ttl_secs: u32,
}

impl WebPushSink {
    pub fn new(
        config: &PushConfig,
        subscriptions: Arc<dyn PushSubscriptionStore>,
    ) -> Result<Self, RemindError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RemindError::Dispatch {
                message: format!("failed to build push HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            subscriptions,
            ttl_secs: config.ttl_secs,
        })
    }

    /// Permanent-failure statuses after which an endpoint is pruned.
    fn is_gone(status: StatusCode) -> bool {
        status == StatusCode::NOT_FOUND || status == StatusCode::GONE
    }
}

#[async_trait]
impl PushSink for WebPushSink {
    async fn send(
        &self,
        user: &UserId,
        title: &str,
        body: &str,
        metadata: Option<serde_json::Value>,
    ) -> DispatchOutcome {
        let subs = match self.subscriptions.list_for_user(user).await {
            Ok(subs) => subs,
            Err(err) => {
                warn!(user = %user.0, %err, "failed to load push subscriptions");
                return DispatchOutcome::Failed;
            }
        };
        if subs.is_empty() {
            debug!(user = %user.0, "no push subscriptions registered");
            return DispatchOutcome::Failed;
        }

        let payload = json!({
            "title": title,
            "body": body,
            "data": metadata,
        });

        let mut any_sent = false;
        for sub in subs {
            let response = self
                .client
                .post(&sub.endpoint)
                .header("TTL", self.ttl_secs)
                .json(&payload)
                .send()
                .await;
            match response {
                Ok(resp) if resp.status().is_success() => {
                    any_sent = true;
                }
                Ok(resp) if Self::is_gone(resp.status()) => {
                    debug!(endpoint = %sub.endpoint, status = %resp.status(), "pruning dead push endpoint");
                    if let Err(err) = self.subscriptions.delete_by_endpoint(&sub.endpoint).await {
                        warn!(endpoint = %sub.endpoint, %err, "failed to prune push endpoint");
                    }
                }
                Ok(resp) => {
                    warn!(endpoint = %sub.endpoint, status = %resp.status(), "push endpoint rejected payload");
                }
                Err(err) => {
                    warn!(endpoint = %sub.endpoint, %err, "push dispatch failed");
                }
            }
        }

        if any_sent {
            DispatchOutcome::Sent
        } else {
            DispatchOutcome::Failed
        }
    }
}

/// Stands in when push is disabled by configuration; drops every dispatch.
pub struct DisabledPushSink;

#[async_trait]
impl PushSink for DisabledPushSink {
    async fn send(
        &self,
        user: &UserId,
        _title: &str,
        _body: &str,
        _metadata: Option<serde_json::Value>,
    ) -> DispatchOutcome {
        debug!(user = %user.0, "push disabled, dropping dispatch");
        DispatchOutcome::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myremind_config::model::StorageConfig;
    use myremind_core::{NewUser, PushSubscription, PushSubscriptionStore, UserStore};
    use myremind_storage::SqliteStorage;
    use tempfile::tempdir;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_storage() -> (Arc<SqliteStorage>, UserId, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("push.db").to_str().unwrap().to_string(),
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
        (storage, user.id, dir)
    }

    async fn subscribe(storage: &SqliteStorage, user: &UserId, endpoint: String) {
        storage
            .upsert(&PushSubscription {
                endpoint,
                user_id: user.clone(),
                p256dh: "key".into(),
                auth: "secret".into(),
            })
            .await
            .unwrap();
    }

    fn sink(storage: Arc<SqliteStorage>) -> WebPushSink {
        WebPushSink::new(
            &PushConfig {
                enabled: true,
                ttl_secs: 86_400,
            },
            storage,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn delivers_to_registered_endpoint() {
        let (storage, user, _dir) = setup_storage().await;
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/ep-1"))
            .and(header_exists("TTL"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        subscribe(&storage, &user, format!("{}/push/ep-1", server.uri())).await;

        let outcome = sink(storage)
            .send(&user, "Bảo hiểm hết hạn ngày mai", "Bảo hiểm của An", None)
            .await;
        assert!(outcome.is_sent());
    }

    #[tokio::test]
    async fn gone_endpoint_is_pruned() {
        let (storage, user, _dir) = setup_storage().await;
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/dead"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/push/alive"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        subscribe(&storage, &user, format!("{}/push/dead", server.uri())).await;
        subscribe(&storage, &user, format!("{}/push/alive", server.uri())).await;

        let outcome = sink(storage.clone()).send(&user, "t", "b", None).await;
        assert!(outcome.is_sent(), "live endpoint still counts as sent");

        let remaining = storage.list_for_user(&user).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].endpoint.ends_with("/push/alive"));
    }

    #[tokio::test]
    async fn all_endpoints_failing_reports_failed() {
        let (storage, user, _dir) = setup_storage().await;
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        subscribe(&storage, &user, format!("{}/push/ep-1", server.uri())).await;

        let outcome = sink(storage).send(&user, "t", "b", None).await;
        assert!(!outcome.is_sent());
    }

    #[tokio::test]
    async fn no_subscriptions_reports_failed() {
        let (storage, user, _dir) = setup_storage().await;
        let outcome = sink(storage).send(&user, "t", "b", None).await;
        assert!(!outcome.is_sent());
    }
}
