//! Per-subdomain single-writer locks.
//!
//! Publishes and rollbacks for one subdomain run one at a time; different
//! subdomains never contend. Entries nobody holds or waits on are pruned on
//! the next acquisition, so the map stays proportional to in-flight work.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Held for the duration of one publish or rollback.
pub type SubdomainGuard = OwnedMutexGuard<()>;

#[derive(Debug, Default)]
pub struct SubdomainLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl SubdomainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `subdomain`.
    pub async fn acquire(&self, subdomain: &str) -> SubdomainGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(subdomain.to_string()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of subdomains currently tracked.
    pub fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_subdomain_is_exclusive() {
        let locks = Arc::new(SubdomainLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_seen = Arc::clone(&max_seen);
                tokio::spawn(async move {
                    let _guard = locks.acquire("john-wedding").await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn different_subdomains_do_not_block() {
        let locks = SubdomainLocks::new();
        let _a = locks.acquire("ana-y-luis").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("john-wedding"))
            .await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_entries_are_pruned() {
        let locks = SubdomainLocks::new();
        drop(locks.acquire("one-site").await);
        drop(locks.acquire("two-site").await);
        // Acquiring prunes idle entries before inserting.
        let _held = locks.acquire("three-site").await;
        assert_eq!(locks.tracked(), 1);
    }
}
