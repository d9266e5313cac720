// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the MyRemind renewal reminder service.
//!
//! Provides the domain types, error taxonomy, and the adapter traits the
//! rest of the workspace implements: repositories over the relational store,
//! outbound push/email sinks, the named-mutex capability used by the
//! deduplicating create, and request-scoped identity resolution.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RemindError;
pub use types::{
    CurrentUser, DuePolicy, NewNotification, NewPolicy, NewUser, Notification, NotificationId,
    NotificationKind, Policy, PolicyFilter, PolicyId, PolicyPatch, Priority, PushSubscription,
    ReminderCadence, User, UserId,
};

pub use traits::{
    AuthContext, DispatchOutcome, EmailSink, LockGuard, LockManager, NotificationStore,
    PolicyStore, PushSink, PushSubscriptionStore, UserStore,
};
