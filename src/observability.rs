//! Metrics hooks for cache operations.
//!
//! Implement [`CacheMetrics`] to feed hit/miss/set/delete/error events into a
//! monitoring system:
//!
//! ```ignore
//! use inventory_kit::observability::CacheMetrics;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl CacheMetrics for PrometheusMetrics {
//!     fn record_hit(&self, _key: &str, _duration: Duration) {
//!         // counter!("inventory_cache_hits").inc();
//!     }
//! }
//! ```
//!
//! The default trait methods log through the `log` crate. [`NoOpMetrics`]
//! discards everything; [`CountingMetrics`] keeps totals in atomics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Trait for cache metrics collection.
pub trait CacheMetrics: Send + Sync {
    /// Record a cache hit.
    fn record_hit(&self, key: &str, duration: Duration) {
        debug!("Cache HIT: {} took {:?}", key, duration);
    }

    /// Record a cache miss that went to the network.
    fn record_miss(&self, key: &str, duration: Duration) {
        debug!("Cache MISS: {} took {:?}", key, duration);
    }

    /// Record a cache population.
    fn record_set(&self, key: &str) {
        debug!("Cache SET: {}", key);
    }

    /// Record an invalidation. `None` means the whole store.
    fn record_delete(&self, key: Option<&str>) {
        debug!("Cache DELETE: {}", key.unwrap_or("*"));
    }

    /// Record a failed fetch.
    fn record_error(&self, key: &str, error: &str) {
        warn!("Cache ERROR for {}: {}", key, error);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl CacheMetrics for NoOpMetrics {
    fn record_hit(&self, _key: &str, _duration: Duration) {}
    fn record_miss(&self, _key: &str, _duration: Duration) {}
    fn record_set(&self, _key: &str) {}
    fn record_delete(&self, _key: Option<&str>) {}
    fn record_error(&self, _key: &str, _error: &str) {}
}

/// Snapshot of [`CountingMetrics`] totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub deletes: u64,
    pub errors: u64,
}

/// Metrics that count events. Clones share the same counters.
#[derive(Clone, Default)]
pub struct CountingMetrics {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    deletes: AtomicU64,
    errors: AtomicU64,
}

impl CountingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            sets: self.inner.sets.load(Ordering::Relaxed),
            deletes: self.inner.deletes.load(Ordering::Relaxed),
            errors: self.inner.errors.load(Ordering::Relaxed),
        }
    }
}

impl CacheMetrics for CountingMetrics {
    fn record_hit(&self, _key: &str, _duration: Duration) {
        self.inner.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self, _key: &str, _duration: Duration) {
        self.inner.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_set(&self, _key: &str) {
        self.inner.sets.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delete(&self, _key: Option<&str>) {
        self.inner.deletes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self, key: &str, error: &str) {
        warn!("Cache ERROR for {}: {}", key, error);
        self.inner.errors.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_metrics() {
        let metrics = NoOpMetrics;
        metrics.record_hit("getCases", Duration::from_millis(1));
        metrics.record_miss("getCases", Duration::from_millis(2));
        metrics.record_delete(None);
    }

    #[test]
    fn test_counting_metrics_shared_between_clones() {
        let metrics = CountingMetrics::new();
        let clone = metrics.clone();

        clone.record_hit("getCases", Duration::ZERO);
        clone.record_miss("getLiveStock", Duration::ZERO);
        metrics.record_set("getLiveStock");
        metrics.record_delete(Some("getLiveStock"));
        metrics.record_error("getLiveStock", "boom");

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                hits: 1,
                misses: 1,
                sets: 1,
                deletes: 1,
                errors: 1,
            }
        );
    }
}
