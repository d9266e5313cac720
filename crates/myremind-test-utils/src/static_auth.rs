// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! An auth context fixed to one caller.

use async_trait::async_trait;

use myremind_core::{AuthContext, CurrentUser, UserId};

/// Resolves every request to the same user, or to nobody.
pub struct StaticAuth {
    user: Option<CurrentUser>,
}

impl StaticAuth {
    /// An authenticated context for the given identity.
    pub fn signed_in(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user: Some(CurrentUser {
                id: UserId(id.into()),
                email: email.into(),
                name: name.into(),
            }),
        }
    }

    /// An anonymous context.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl AuthContext for StaticAuth {
    async fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signed_in_resolves_identity() {
        let auth = StaticAuth::signed_in("u-1", "an@example.com", "An");
        let user = auth.current_user().await.unwrap();
        assert_eq!(user.id, UserId("u-1".into()));
        assert_eq!(user.email, "an@example.com");
    }

    #[tokio::test]
    async fn anonymous_resolves_none() {
        assert!(StaticAuth::anonymous().current_user().await.is_none());
    }
}
