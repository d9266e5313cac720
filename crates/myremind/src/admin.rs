// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Administrative commands over the service layer.
//!
//! These run the same owner-scoped operations the web surface would,
//! resolving the acting user from an email address instead of a session.

use std::sync::Arc;

use async_trait::async_trait;

use myremind_config::MyRemindConfig;
use myremind_core::{
    AuthContext, CurrentUser, NewUser, PolicyFilter, RemindError, UserStore,
};
use myremind_service::{InboxService, KeyedMutex, PolicyDraft, PolicyService};
use myremind_storage::SqliteStorage;

/// Auth context fixed to a user resolved by email at command start.
struct EmailAuth {
    user: CurrentUser,
}

#[async_trait]
impl AuthContext for EmailAuth {
    async fn current_user(&self) -> Option<CurrentUser> {
        Some(self.user.clone())
    }
}

async fn resolve_user(storage: &SqliteStorage, email: &str) -> Result<CurrentUser, RemindError> {
    let user = storage
        .find_by_email(email)
        .await?
        .ok_or_else(|| RemindError::NotFound(format!("user {email}")))?;
    Ok(CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
    })
}

fn policy_service(storage: Arc<SqliteStorage>, user: CurrentUser) -> PolicyService {
    PolicyService::new(
        storage.clone(),
        storage,
        Arc::new(KeyedMutex::new()),
        Arc::new(EmailAuth { user }),
    )
}

pub struct PolicyAddArgs {
    pub name: String,
    pub expiry: String,
    pub code: Option<String>,
    pub phone: Option<String>,
    pub cadence: Option<String>,
    pub amount: Option<f64>,
}

pub async fn run_user_add(
    config: &MyRemindConfig,
    email: &str,
    name: &str,
) -> Result<(), RemindError> {
    let storage = SqliteStorage::open(&config.storage).await?;
    let user = storage
        .insert(&NewUser {
            email: email.to_string(),
            name: name.to_string(),
        })
        .await?;
    println!("registered {} ({})", user.email, user.id.0);
    storage.close().await
}

pub async fn run_policy_add(
    config: &MyRemindConfig,
    email: &str,
    args: PolicyAddArgs,
) -> Result<(), RemindError> {
    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);
    let user = resolve_user(&storage, email).await?;
    let service = policy_service(storage.clone(), user);

    let policy = service
        .create(PolicyDraft {
            customer_name: args.name,
            phone: args.phone.unwrap_or_default(),
            policy_code: args.code,
            expiry_date: args.expiry,
            payment_amount: args.amount,
            reminder_cadence: args.cadence,
            ..Default::default()
        })
        .await?;
    println!(
        "policy {} for {} expires {} (cadence {})",
        policy.id.0, policy.customer_name, policy.expiry_date, policy.reminder_cadence
    );
    storage.close().await
}

pub async fn run_policy_list(
    config: &MyRemindConfig,
    email: &str,
    expiring_within: Option<i64>,
) -> Result<(), RemindError> {
    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);
    let user = resolve_user(&storage, email).await?;
    let service = policy_service(storage.clone(), user);

    let policies = service
        .list(PolicyFilter {
            expiring_within_days: expiring_within,
        })
        .await?;
    if policies.is_empty() {
        println!("no policies");
    }
    for policy in policies {
        println!(
            "{}  {}  expires {}  {}  {}",
            policy.id.0,
            policy.customer_name,
            policy.expiry_date,
            policy.reminder_cadence,
            if policy.status { "renewed" } else { "active" }
        );
    }
    storage.close().await
}

pub async fn run_inbox(
    config: &MyRemindConfig,
    email: &str,
    mark_all_read: bool,
) -> Result<(), RemindError> {
    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);
    let user = resolve_user(&storage, email).await?;
    let inbox = InboxService::new(storage.clone(), Arc::new(EmailAuth { user }));

    let notifications = inbox.list().await?;
    if notifications.is_empty() {
        println!("inbox empty");
    }
    for notification in &notifications {
        println!(
            "[{}] {}  {}  {}",
            if notification.read { "read" } else { "new " },
            notification.created_at,
            notification.title,
            notification.message
        );
    }
    if mark_all_read {
        let changed = inbox.mark_all_read().await?;
        println!("marked {changed} notifications read");
    }
    storage.close().await
}
