//! Per-app mutual exclusion for the scheduler engine (spec.md §5).
//!
//! Offer matching, status ingestion and administrative operations against
//! the same app must not interleave. Locks are created lazily and kept in a
//! map guarded by a `tokio::sync::RwLock` so that looking one up never
//! blocks unrelated apps; the per-app lock itself is a `tokio::sync::Mutex`
//! because callers hold it across `.await` points (collaborator calls),
//! which rules out `std::sync` or `parking_lot` guards here.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

#[derive(Default)]
pub struct AppLockRegistry {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl AppLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    async fn lock_for(&self, app_id: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(app_id) {
            return lock.clone();
        }
        let mut locks = self.locks.write().await;
        locks
            .entry(app_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Acquire the lock for `app_id`, holding it until the returned guard is
    /// dropped. Safe to call concurrently for distinct app ids.
    pub async fn acquire(&self, app_id: &str) -> AppLockGuard {
        let lock = self.lock_for(app_id).await;
        AppLockGuard::new(lock).await
    }

    /// Drop the lock entry for an app that no longer exists (`stopApp`).
    /// Any guard currently held keeps working; this only prevents the map
    /// from growing unboundedly across the lifetime of the process.
    pub async fn forget(&self, app_id: &str) {
        self.locks.write().await.remove(app_id);
    }
}

/// Holds the app's lock for as long as the guard lives. Built on
/// `lock_owned`, which ties the guard's lifetime to the `Arc` itself rather
/// than to a borrow, so the registry is free to drop its own map entry
/// while a caller still holds this guard.
pub struct AppLockGuard {
    _guard: OwnedMutexGuard<()>,
}

impl AppLockGuard {
    async fn new(lock: Arc<Mutex<()>>) -> Self {
        let guard = lock.lock_owned().await;
        Self { _guard: guard }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn distinct_apps_do_not_block_each_other() {
        let registry = Arc::new(AppLockRegistry::new());
        let r1 = registry.clone();
        let r2 = registry.clone();

        let a = tokio::spawn(async move {
            let _g = r1.acquire("a").await;
            tokio::time::sleep(Duration::from_millis(20)).await;
        });
        let b = tokio::spawn(async move {
            let _g = r2.acquire("b").await;
            tokio::time::sleep(Duration::from_millis(20)).await;
        });

        let start = tokio::time::Instant::now();
        let _ = tokio::join!(a, b);
        assert!(start.elapsed() < Duration::from_millis(60));
    }

    #[tokio::test]
    async fn same_app_serializes_critical_sections() {
        let registry = Arc::new(AppLockRegistry::new());
        let counter = Arc::new(AtomicU32::new(0));
        let mut handles = Vec::new();

        for _ in 0..10 {
            let registry = registry.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let _guard = registry.acquire("x").await;
                let before = counter.load(Ordering::SeqCst);
                tokio::task::yield_now().await;
                counter.store(before + 1, Ordering::SeqCst);
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }
}
