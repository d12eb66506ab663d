//! Per-name generation locks.
//!
//! Step 0 of generation deletes whatever bundle already sits at the target
//! path, so two overlapping runs for the same name would tear down each
//! other's output. Runs are serialised per sanitized name within one process;
//! different names never wait on each other.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of one async mutex per bundle name.
#[derive(Debug, Default)]
pub struct NameLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl NameLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `name`. Access lasts while the guard lives.
    pub async fn acquire(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            // A poisoned registry still holds valid entries.
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Drop entries nobody holds so the map does not grow without bound.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(name.to_string()).or_default())
        };

        if lock.try_lock().is_err() {
            log::info!("Waiting for another generation of \"{}\" to finish", name);
        }
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_name_is_exclusive() {
        let locks = NameLocks::new();
        let guard = locks.acquire("Mail").await;

        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire("Mail")).await;
        assert!(second.is_err());

        drop(guard);
        let third = tokio::time::timeout(Duration::from_secs(1), locks.acquire("Mail")).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn different_names_do_not_block() {
        let locks = NameLocks::new();
        let _mail = locks.acquire("Mail").await;
        let other = tokio::time::timeout(Duration::from_secs(1), locks.acquire("Calendar")).await;
        assert!(other.is_ok());
    }
}
