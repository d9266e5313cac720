// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named-mutex capability for the deduplicating-create protocol.
//!
//! The contract is mutual exclusion per key only: requests sharing a key are
//! serialized, unrelated keys proceed concurrently. A single-instance
//! deployment satisfies this with an in-process keyed mutex map; a
//! multi-instance deployment may substitute a database advisory lock.

use async_trait::async_trait;

use crate::error::RemindError;

/// RAII guard for an acquired named lock. The lock is released on drop,
/// success or failure.
pub struct LockGuard {
    _inner: Box<dyn std::any::Any + Send>,
}

impl LockGuard {
    /// Wrap an implementation-specific guard value.
    pub fn new(inner: impl Send + 'static) -> Self {
        Self {
            _inner: Box::new(inner),
        }
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LockGuard")
    }
}

/// Scope-bound exclusive locks keyed by an arbitrary string.
#[async_trait]
pub trait LockManager: Send + Sync {
    /// Block until the named lock is exclusively held, returning a guard
    /// that releases it on drop.
    async fn acquire(&self, key: &str) -> Result<LockGuard, RemindError>;
}
