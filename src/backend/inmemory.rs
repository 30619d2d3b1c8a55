//! In-memory cache store (default, thread-safe, async).
//!
//! Uses DashMap for concurrent access with per-key sharding.
//! Expiry is checked lazily on access; there is no background sweeper.

use super::CacheBackend;
use crate::error::Result;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Default time-to-live for cached entries (120 000 ms).
pub const DEFAULT_TTL: Duration = Duration::from_millis(120_000);

/// In-memory cache entry, stamped at insertion.
struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(value: Value) -> Self {
        CacheEntry {
            value,
            stored_at: Instant::now(),
        }
    }

    /// An entry exactly `ttl` old is still fresh.
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }
}

/// Thread-safe async in-memory cache store.
///
/// One instance lives as long as the client that owns it; clones share the
/// same map. Nothing is persisted. The map is unbounded: keys come from a
/// small fixed domain (case lists, component lists, live stock).
///
/// # Example
///
/// ```no_run
/// use inventory_kit::backend::{CacheBackend, InMemoryBackend};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let backend = InMemoryBackend::new();
///
///     backend.set("getCases", json!(["Case A", "Case B"])).await?;
///     assert!(backend.get("getCases").await?.is_some());
///
///     backend.invalidate(None).await?;
///     assert!(backend.get("getCases").await?.is_none());
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InMemoryBackend {
    store: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl InMemoryBackend {
    /// Create a store with the default 120 s TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a store with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        InMemoryBackend {
            store: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the current number of entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Get store statistics.
    pub async fn stats(&self) -> CacheStats {
        let expired_count = self
            .store
            .iter()
            .filter(|entry| entry.is_expired(self.ttl))
            .count();

        CacheStats {
            total_entries: self.store.len(),
            expired_entries: expired_count,
        }
    }

    /// Print store statistics to debug log.
    pub async fn log_stats(&self) {
        let stats = self.stats().await;
        debug!(
            "Cache Stats: {} entries ({} expired)",
            stats.total_entries, stats.expired_entries
        );
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if let Some(entry) = self.store.get(key) {
            if !entry.is_expired(self.ttl) {
                debug!("✓ InMemory GET {} -> HIT", key);
                return Ok(Some(entry.value.clone()));
            }
        }

        // Re-checked under the shard lock so a concurrent fresh `set` survives.
        self.store
            .remove_if(key, |_, entry| entry.is_expired(self.ttl));
        debug!("✓ InMemory GET {} -> MISS", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.store.insert(key.to_string(), CacheEntry::new(value));
        debug!("✓ InMemory SET {} (TTL: {:?})", key, self.ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store.remove(key);
        debug!("✓ InMemory DELETE {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        if let Some(entry) = self.store.get(key) {
            return Ok(!entry.is_expired(self.ttl));
        }

        Ok(false)
    }

    async fn mdelete(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.store.remove(*key);
        }

        debug!("✓ InMemory MDELETE {:?}", keys);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.store.clear();
        warn!("⚠ InMemory CLEAR_ALL executed - all cache cleared!");
        Ok(())
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_inmemory_backend_set_get() {
        let backend = InMemoryBackend::new();
        let value = json!([{"component": "Widget", "stock": 7}]);

        backend
            .set("getLiveStock", value.clone())
            .await
            .expect("Failed to set");

        let result = backend.get("getLiveStock").await.expect("Failed to get");
        assert_eq!(result, Some(value));
    }

    #[tokio::test]
    async fn test_inmemory_backend_miss() {
        let backend = InMemoryBackend::new();

        let result = backend.get("nonexistent").await.expect("Failed to get");
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_inmemory_backend_set_replaces() {
        let backend = InMemoryBackend::new();
        backend.set("getCases", json!(["Case A"])).await.unwrap();
        backend
            .set("getCases", json!(["Case A", "Case B"]))
            .await
            .unwrap();

        assert_eq!(backend.len().await, 1);
        assert_eq!(
            backend.get("getCases").await.unwrap(),
            Some(json!(["Case A", "Case B"]))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_at_exact_ttl() {
        let backend = InMemoryBackend::with_ttl(Duration::from_millis(100));
        backend.set("getCases", json!(["Case A"])).await.unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;

        assert!(backend.get("getCases").await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_inmemory_backend_ttl_expiration() {
        let backend = InMemoryBackend::with_ttl(Duration::from_millis(100));
        backend.set("getCases", json!(["Case A"])).await.unwrap();

        tokio::time::advance(Duration::from_millis(101)).await;

        assert_eq!(backend.get("getCases").await.unwrap(), None);
        // Lazy expiry removed the entry
        assert_eq!(backend.len().await, 0);
        assert_eq!(backend.get("getCases").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_is_two_minutes() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.ttl(), Duration::from_secs(120));

        backend.set("getLiveStock", json!([])).await.unwrap();
        tokio::time::advance(Duration::from_secs(119)).await;
        assert!(backend.get("getLiveStock").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(backend.get("getLiveStock").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repopulate_resets_timestamp() {
        let backend = InMemoryBackend::with_ttl(Duration::from_millis(100));
        backend.set("getCases", json!(["old"])).await.unwrap();

        tokio::time::advance(Duration::from_millis(80)).await;
        backend.set("getCases", json!(["new"])).await.unwrap();
        tokio::time::advance(Duration::from_millis(80)).await;

        assert_eq!(
            backend.get("getCases").await.unwrap(),
            Some(json!(["new"]))
        );
    }

    #[tokio::test]
    async fn test_inmemory_backend_delete() {
        let backend = InMemoryBackend::new();

        backend.set("getCases", json!([])).await.expect("Failed to set");
        assert!(backend.exists("getCases").await.unwrap());

        backend.delete("getCases").await.expect("Failed to delete");
        assert!(!backend.exists("getCases").await.unwrap());
    }

    #[tokio::test]
    async fn test_inmemory_backend_mdelete() {
        let backend = InMemoryBackend::new();

        backend.set("getLiveStock", json!([])).await.unwrap();
        backend.set("getComponents:Case A", json!([])).await.unwrap();
        backend.set("getCases", json!([])).await.unwrap();

        assert_eq!(backend.len().await, 3);

        backend
            .mdelete(&["getLiveStock", "getComponents:Case A"])
            .await
            .expect("Failed to mdelete");

        assert_eq!(backend.len().await, 1);
        assert!(backend.get("getCases").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_inmemory_backend_clear_all() {
        let backend = InMemoryBackend::new();

        backend.set("getCases", json!([])).await.unwrap();
        backend.set("getLiveStock", json!([])).await.unwrap();

        assert_eq!(backend.len().await, 2);

        backend.clear_all().await.expect("Failed to clear");

        assert_eq!(backend.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inmemory_backend_stats() {
        let backend = InMemoryBackend::with_ttl(Duration::from_millis(50));

        backend.set("getCases", json!([])).await.unwrap();
        tokio::time::advance(Duration::from_millis(60)).await;
        backend.set("getLiveStock", json!([])).await.unwrap();

        let stats = backend.stats().await;
        assert_eq!(
            stats,
            CacheStats {
                total_entries: 2,
                expired_entries: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_inmemory_backend_clone_shares_store() {
        let backend1 = InMemoryBackend::new();
        backend1.set("getCases", json!(["Case A"])).await.unwrap();

        let backend2 = backend1.clone();

        let value = backend2.store.get("getCases").map(|e| e.value.clone());
        assert_eq!(value, Some(json!(["Case A"])));
    }

    #[tokio::test]
    async fn test_inmemory_backend_thread_safe() {
        let backend = InMemoryBackend::new();
        let mut handles = vec![];

        for i in 0..10 {
            let b = backend.clone();
            let handle = tokio::spawn(async move {
                let key = format!("getComponents:Case {}", i);
                b.set(&key, json!([format!("part_{}", i)]))
                    .await
                    .expect("Failed to set");
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.await.expect("Task failed");
        }

        assert_eq!(backend.len().await, 10);
    }
}
