//! Inventory operations with cache coordination.
//!
//! Every operation validates its arguments before touching the network and
//! then performs exactly one request. Reads of listings go through the cache;
//! writes evict exactly the keys they can make stale, and only after the
//! backend confirms success.

use crate::backend::{CacheBackend, InMemoryBackend};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::expander::CacheExpander;
use crate::key::{CacheKeyBuilder, CASES_KEY, LIVE_STOCK_KEY};
use crate::model::{Holding, StockItem, TransactionResult, WriteReply, WriteRequest};
use crate::observability::CacheMetrics;
use crate::strategy::CacheStrategy;
use crate::transport::{HttpTransport, Transport};
use crate::validate::{require_non_empty, Quantity};
use std::sync::Arc;

/// Typed, cache-aware client for the inventory backend.
///
/// Wraps `CacheExpander` in `Arc`, so clones are cheap and share one cache.
/// The cache lives as long as the last clone.
///
/// # Example
///
/// ```ignore
/// use inventory_kit::{ClientConfig, InventoryService};
///
/// let service = InventoryService::from_config(&ClientConfig::load()?)?;
///
/// let stock = service.get_live_stock().await?;
/// let outcome = service.borrow("u1", "Case A", "Widget", 2).await?;
/// if !outcome.success {
///     eprintln!("refused: {}", outcome.message);
/// }
/// ```
pub struct InventoryService<B: CacheBackend, T: Transport> {
    expander: Arc<CacheExpander<B, T>>,
}

impl<B: CacheBackend, T: Transport> Clone for InventoryService<B, T> {
    fn clone(&self) -> Self {
        InventoryService {
            expander: Arc::clone(&self.expander),
        }
    }
}

impl InventoryService<InMemoryBackend, HttpTransport> {
    /// Wire an in-memory cache and an HTTP transport from configuration.
    ///
    /// A missing endpoint URL does not fail here; requests fail instead.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let backend = InMemoryBackend::with_ttl(config.cache_ttl());
        let transport = HttpTransport::new(config.endpoint_url.clone());
        Ok(Self::new(backend, transport))
    }
}

impl<B: CacheBackend, T: Transport> InventoryService<B, T> {
    /// Create a service over an injected cache store and transport.
    pub fn new(backend: B, transport: T) -> Self {
        InventoryService {
            expander: Arc::new(CacheExpander::new(backend, transport)),
        }
    }

    /// Create a service with custom metrics.
    pub fn with_metrics(backend: B, transport: T, metrics: Box<dyn CacheMetrics>) -> Self {
        InventoryService {
            expander: Arc::new(CacheExpander::new(backend, transport).with_metrics(metrics)),
        }
    }

    /// Names of all cases. Cached under `"getCases"`.
    pub async fn list_cases(&self) -> Result<Vec<String>> {
        self.expander
            .cached_get(CASES_KEY, &[("action", "getCases")])
            .await
    }

    /// Components stored in `case_name`. Cached per case.
    pub async fn list_components(&self, case_name: &str) -> Result<Vec<String>> {
        require_non_empty("caseName", case_name)?;

        let key = CacheKeyBuilder::components(case_name);
        self.expander
            .cached_get(&key, &[("action", "getComponents"), ("case", case_name)])
            .await
    }

    /// Outstanding loans for `user_id`. Always fetched live.
    pub async fn get_user_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
        require_non_empty("userId", user_id)?;

        let label = CacheKeyBuilder::build_with_prefix("getUserHoldings", &user_id);
        self.expander
            .fetch(
                &label,
                &[("action", "getUserHoldings"), ("userId", user_id)],
                CacheStrategy::Bypass,
            )
            .await
    }

    /// Current shelf stock. Cached under `"getLiveStock"`.
    pub async fn get_live_stock(&self) -> Result<Vec<StockItem>> {
        self.expander
            .cached_get(LIVE_STOCK_KEY, &[("action", "getLiveStock")])
            .await
    }

    /// Borrow `quantity` units of `component` from `case_name`.
    ///
    /// On success the live stock and that case's component listing are
    /// evicted. A refusal from the backend is returned as
    /// `TransactionResult { success: false, .. }` and evicts nothing.
    ///
    /// # Errors
    ///
    /// - `Error::Validation`: empty argument or non-positive/fractional quantity
    /// - `Error::Transport`, `Error::Decode`, `Error::Network`: request failed
    pub async fn borrow<Q>(
        &self,
        user_id: &str,
        case_name: &str,
        component: &str,
        quantity: Q,
    ) -> Result<TransactionResult>
    where
        Q: TryInto<Quantity, Error = Error>,
    {
        require_non_empty("userId", user_id)?;
        require_non_empty("caseName", case_name)?;
        require_non_empty("component", component)?;
        let quantity: Quantity = quantity.try_into()?;

        let request = WriteRequest::Borrow {
            user_id,
            case_name,
            component,
            quantity,
        };

        match self.submit(&request).await? {
            WriteReply::Rejected(reason) => {
                warn!("Borrow of {}x {} refused: {}", quantity, component, reason);
                Ok(TransactionResult::rejected(reason))
            }
            WriteReply::Accepted => {
                let components_key = CacheKeyBuilder::components(case_name);
                self.expander
                    .invalidate_many(&[LIVE_STOCK_KEY, components_key.as_str()])
                    .await?;
                info!("✓ {} borrowed {}x {} from {}", user_id, quantity, component, case_name);
                Ok(TransactionResult::accepted(format!(
                    "Successfully borrowed {}x {}!",
                    quantity, component
                )))
            }
        }
    }

    /// Return `quantity` units of `component`.
    ///
    /// On success the live stock is evicted.
    pub async fn return_item<Q>(
        &self,
        user_id: &str,
        component: &str,
        quantity: Q,
    ) -> Result<TransactionResult>
    where
        Q: TryInto<Quantity, Error = Error>,
    {
        require_non_empty("userId", user_id)?;
        require_non_empty("component", component)?;
        let quantity: Quantity = quantity.try_into()?;

        let request = WriteRequest::Return {
            user_id,
            component,
            quantity,
        };

        match self.submit(&request).await? {
            WriteReply::Rejected(reason) => {
                warn!("Return of {}x {} refused: {}", quantity, component, reason);
                Ok(TransactionResult::rejected(reason))
            }
            WriteReply::Accepted => {
                self.expander.invalidate(Some(LIVE_STOCK_KEY)).await?;
                info!("✓ {} returned {}x {}", user_id, quantity, component);
                Ok(TransactionResult::accepted(format!(
                    "Successfully returned {}x {}!",
                    quantity, component
                )))
            }
        }
    }

    /// Evict one cache key, or the whole cache when `key` is `None`.
    pub async fn invalidate_cache(&self, key: Option<&str>) -> Result<()> {
        self.expander.invalidate(key).await
    }

    async fn submit(&self, request: &WriteRequest<'_>) -> Result<WriteReply> {
        self.expander.transport().post(request).await
    }

    /// Get a reference to the underlying expander.
    pub fn expander(&self) -> &CacheExpander<B, T> {
        &self.expander
    }
}
