// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped identity resolution.
//!
//! Session issuance and token verification live outside this workspace; the
//! core only consumes the resolved identity.

use async_trait::async_trait;

use crate::types::CurrentUser;

/// Resolves the caller's identity from a request-scoped credential.
#[async_trait]
pub trait AuthContext: Send + Sync {
    /// The authenticated user, or `None` for anonymous callers.
    async fn current_user(&self) -> Option<CurrentUser>;
}
