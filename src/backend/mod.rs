//! Cache store implementations.

use crate::error::Result;
use serde_json::Value;

pub mod inmemory;

pub use inmemory::{CacheStats, InMemoryBackend, DEFAULT_TTL};

/// Trait for cache store implementations.
///
/// Maps an opaque string key to a JSON value. Expiry is the store's concern:
/// `get` must never return a value older than the store's TTL.
///
/// **IMPORTANT:** All methods use `&self` instead of `&mut self` to allow concurrent access.
/// Implementations should use interior mutability and must not hold a lock across an `.await`.
///
/// **ASYNC:** All methods are async and must be awaited.
#[allow(async_fn_in_trait)]
pub trait CacheBackend: Send + Sync + Clone {
    /// Retrieve a fresh value by key.
    ///
    /// # Returns
    /// - `Ok(Some(value))` - Value found and within TTL
    /// - `Ok(None)` - Key absent or expired (an expired entry is removed)
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace the value for `key`, stamped with the current time.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove one entry. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Remove every entry.
    async fn clear_all(&self) -> Result<()>;

    /// Check if a fresh value exists for key.
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Bulk delete operation.
    ///
    /// Default implementation calls `delete()` for each key.
    async fn mdelete(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.delete(key).await?;
        }
        Ok(())
    }

    /// Delete one entry when `key` is given, otherwise clear the whole store.
    ///
    /// Idempotent: invalidating an absent key never fails.
    async fn invalidate(&self, key: Option<&str>) -> Result<()> {
        match key {
            Some(key) => self.delete(key).await,
            None => self.clear_all().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_backend_exists_default() {
        let backend = InMemoryBackend::new();
        backend
            .set("getCases", json!(["Case A"]))
            .await
            .expect("Failed to set key");
        assert!(backend
            .exists("getCases")
            .await
            .expect("Failed to check exists"));
        assert!(!backend
            .exists("getLiveStock")
            .await
            .expect("Failed to check exists"));
    }

    #[tokio::test]
    async fn test_invalidate_single_key_leaves_others() {
        let backend = InMemoryBackend::new();
        backend.set("getCases", json!(["Case A"])).await.unwrap();
        backend
            .set("getLiveStock", json!([{"component": "Widget", "stock": 4}]))
            .await
            .unwrap();

        backend.invalidate(Some("getLiveStock")).await.unwrap();

        assert_eq!(backend.get("getLiveStock").await.unwrap(), None);
        assert_eq!(
            backend.get("getCases").await.unwrap(),
            Some(json!(["Case A"]))
        );
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let backend = InMemoryBackend::new();
        backend.set("getCases", json!([])).await.unwrap();
        backend.set("getComponents:Case A", json!([])).await.unwrap();

        backend.invalidate(None).await.unwrap();

        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalidate_absent_key_is_noop() {
        let backend = InMemoryBackend::new();
        backend.invalidate(Some("never-set")).await.unwrap();
        backend.invalidate(Some("never-set")).await.unwrap();
        assert!(backend.is_empty().await);
    }
}
