// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the seams of the system.

pub mod auth;
pub mod lock;
pub mod sink;
pub mod store;

pub use auth::AuthContext;
pub use lock::{LockGuard, LockManager};
pub use sink::{DispatchOutcome, EmailSink, PushSink};
pub use store::{NotificationStore, PolicyStore, PushSubscriptionStore, UserStore};
