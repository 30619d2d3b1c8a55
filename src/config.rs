//! Client configuration.
//!
//! Loaded with figment, lowest to highest precedence:
//! 1. Programmatic defaults
//! 2. Environment variables with the `INVENTORY_` prefix
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `INVENTORY_ENDPOINT_URL` | `endpoint_url` | unset |
//! | `INVENTORY_CACHE_TTL_MS` | `cache_ttl_ms` | `120000` |

use crate::backend::DEFAULT_TTL;
use crate::error::{Error, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prefix for environment variables read by [`ClientConfig::load`].
pub const ENV_PREFIX: &str = "INVENTORY_";

/// Configuration for [`InventoryService`](crate::InventoryService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend endpoint. Requests fail with `Error::Config` while unset.
    pub endpoint_url: Option<String>,

    /// Cache time-to-live in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint_url: None,
            cache_ttl_ms: DEFAULT_TTL.as_millis() as u64,
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults and the environment.
    ///
    /// A missing endpoint URL only logs a warning.
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(ClientConfig::default()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    /// Extract and validate configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let mut config: ClientConfig = figment.extract()?;
        config.normalize()?;
        Ok(config)
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    fn normalize(&mut self) -> Result<()> {
        if self.cache_ttl_ms == 0 {
            return Err(Error::Config("cache_ttl_ms must be greater than 0".to_string()));
        }

        if self
            .endpoint_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.endpoint_url = None;
        }

        if self.endpoint_url.is_none() {
            warn!(
                "⚠ {}ENDPOINT_URL is not set; inventory requests will fail until it is configured",
                ENV_PREFIX
            );
        }

        Ok(())
    }
}
