//! Cache expander - cached reads on top of a transport.

use crate::backend::CacheBackend;
use crate::error::{Error, Result};
use crate::observability::{CacheMetrics, NoOpMetrics};
use crate::strategy::CacheStrategy;
use crate::transport::Transport;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Core cache expander - handles cache lookup and network fallback.
///
/// Concurrent reads of the same key share one network fetch: callers queue on
/// a per-key async lock and re-check the cache once they hold it. The map of
/// locks is only touched in short synchronous sections.
///
/// # Example
///
/// ```ignore
/// use inventory_kit::{CacheExpander, backend::InMemoryBackend, transport::HttpTransport};
///
/// let expander = CacheExpander::new(InMemoryBackend::new(), HttpTransport::new(Some(url)));
/// let cases: Vec<String> = expander.cached_get("getCases", &[("action", "getCases")]).await?;
/// ```
pub struct CacheExpander<B: CacheBackend, T: Transport> {
    backend: B,
    transport: T,
    metrics: Box<dyn CacheMetrics>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<B: CacheBackend, T: Transport> CacheExpander<B, T> {
    /// Create new expander with given store and transport.
    pub fn new(backend: B, transport: T) -> Self {
        CacheExpander {
            backend,
            transport,
            metrics: Box::new(NoOpMetrics),
            in_flight: DashMap::new(),
        }
    }

    /// Set custom metrics handler.
    pub fn with_metrics(mut self, metrics: Box<dyn CacheMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Serve `key` from cache if fresh, otherwise GET `params` and store the result.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn cached_get<V>(&self, key: &str, params: &[(&str, &str)]) -> Result<V>
    where
        V: Serialize + DeserializeOwned,
    {
        self.fetch(key, params, CacheStrategy::Refresh).await
    }

    /// Read with an explicit strategy.
    ///
    /// With [`CacheStrategy::Bypass`] the key is only used as a label in logs
    /// and metrics.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Transport`], [`Error::Decode`], [`Error::Network`]
    /// and [`Error::Config`] from the transport unchanged.
    pub async fn fetch<V>(
        &self,
        key: &str,
        params: &[(&str, &str)],
        strategy: CacheStrategy,
    ) -> Result<V>
    where
        V: Serialize + DeserializeOwned,
    {
        let timer = Instant::now();
        debug!("» Cache read for key: {} (strategy: {})", key, strategy);

        match strategy {
            CacheStrategy::Bypass => self.load(key, params, timer).await,
            CacheStrategy::Refresh => {
                if let Some(value) = self.lookup(key).await? {
                    self.metrics.record_hit(key, timer.elapsed());
                    return Ok(value);
                }
                self.single_flight(key, params, timer, true).await
            }
            CacheStrategy::Invalidate => {
                self.invalidate(Some(key)).await?;
                self.single_flight(key, params, timer, false).await
            }
        }
    }

    /// Drop one key, or every key when `key` is `None`.
    pub async fn invalidate(&self, key: Option<&str>) -> Result<()> {
        self.backend.invalidate(key).await?;
        self.metrics.record_delete(key);
        Ok(())
    }

    /// Drop several keys at once.
    pub async fn invalidate_many(&self, keys: &[&str]) -> Result<()> {
        self.backend.mdelete(keys).await?;
        for key in keys {
            self.metrics.record_delete(Some(key));
        }
        Ok(())
    }

    /// Fetch under the per-key lock, then store.
    async fn single_flight<V>(
        &self,
        key: &str,
        params: &[(&str, &str)],
        timer: Instant,
        recheck: bool,
    ) -> Result<V>
    where
        V: Serialize + DeserializeOwned,
    {
        let lock = self
            .in_flight
            .entry(key.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock().await;
            self.fetch_locked(key, params, timer, recheck).await
        };

        // Only the map and this caller hold the lock: nobody is queued behind us.
        self.in_flight
            .remove_if(key, |_, held| Arc::strong_count(held) <= 2);

        result
    }

    async fn fetch_locked<V>(
        &self,
        key: &str,
        params: &[(&str, &str)],
        timer: Instant,
        recheck: bool,
    ) -> Result<V>
    where
        V: Serialize + DeserializeOwned,
    {
        if recheck {
            if let Some(value) = self.lookup(key).await? {
                debug!("✓ {} populated by a concurrent read", key);
                self.metrics.record_hit(key, timer.elapsed());
                return Ok(value);
            }
        }

        let value: V = self.load(key, params, timer).await?;
        self.store(key, &value).await?;
        Ok(value)
    }

    /// Network GET, recording miss or error.
    async fn load<V>(&self, key: &str, params: &[(&str, &str)], timer: Instant) -> Result<V>
    where
        V: DeserializeOwned,
    {
        match self.transport.get(params).await {
            Ok(value) => {
                self.metrics.record_miss(key, timer.elapsed());
                Ok(value)
            }
            Err(e) => {
                self.metrics.record_error(key, &e.to_string());
                Err(e)
            }
        }
    }

    /// Fresh cached value for `key`, if any.
    ///
    /// An entry that no longer decodes as `V` is evicted and treated as a miss.
    async fn lookup<V>(&self, key: &str) -> Result<Option<V>>
    where
        V: DeserializeOwned,
    {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Evicting undecodable cache entry {}: {}", key, e);
                self.backend.delete(key).await?;
                Ok(None)
            }
        }
    }

    async fn store<V: Serialize>(&self, key: &str, value: &V) -> Result<()> {
        let raw = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.backend.set(key, raw).await?;
        self.metrics.record_set(key);
        Ok(())
    }

    /// Get store reference (for advanced use).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get transport reference.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}
