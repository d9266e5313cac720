// SPDX-FileCopyrightText: 2026 MyRemind Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process keyed mutex, the single-instance [`LockManager`].
//!
//! Each key gets its own mutex, so creates with different dedup keys never
//! block each other. Sufficient for one process; a multi-instance deployment
//! would swap in a database advisory lock behind the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use myremind_core::{LockGuard, LockManager, RemindError};

/// [`LockManager`] backed by a map of named tokio mutexes.
pub struct KeyedMutex {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedMutex {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }
}

impl Default for KeyedMutex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockManager for KeyedMutex {
    async fn acquire(&self, key: &str) -> Result<LockGuard, RemindError> {
        let mutex = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = mutex.lock_owned().await;
        Ok(LockGuard::new(guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn same_key_serializes() {
        let locks = Arc::new(KeyedMutex::new());
        let in_section = Arc::new(AtomicU32::new(0));
        let max_seen = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let in_section = in_section.clone();
            let max_seen = max_seen.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("shared").await.unwrap();
                let now = in_section.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_section.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_keys_do_not_block() {
        let locks = KeyedMutex::new();
        let _a = locks.acquire("key-a").await.unwrap();

        // Held guard on key-a must not delay key-b.
        tokio::time::timeout(Duration::from_millis(100), locks.acquire("key-b"))
            .await
            .expect("unrelated key should acquire immediately")
            .unwrap();
    }

    #[tokio::test]
    async fn guard_drop_releases() {
        let locks = KeyedMutex::new();
        {
            let _guard = locks.acquire("key").await.unwrap();
        }
        tokio::time::timeout(Duration::from_millis(100), locks.acquire("key"))
            .await
            .expect("released lock should reacquire")
            .unwrap();
    }
}
