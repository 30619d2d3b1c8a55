//! # inventory-kit
//!
//! A typed, cache-coordinated client for a remote inventory backend.
//!
//! The backend is reachable through one endpoint URL and two verbs: a
//! parametrized GET for reads and a JSON-body POST for writes. This crate
//! wraps both in typed operations, serves repeated reads from a short-lived
//! in-memory cache, and evicts the affected cache keys after each successful
//! write, so a client never reads back its own stale data.
//!
//! ## Features
//!
//! - **Typed operations:** cases, components, per-user holdings, live stock, borrow, return
//! - **TTL cache:** lazily expiring in-memory store (120 s by default)
//! - **Targeted invalidation:** writes evict only the keys they make stale
//! - **Business rejections as values:** "not enough stock" is a result, not an error
//! - **Shared fetches:** concurrent reads of the same key issue one request
//! - **Injectable seams:** swap the cache store ([`CacheBackend`]) or transport ([`Transport`])
//!
//! ## Quick Start
//!
//! ```ignore
//! use inventory_kit::{ClientConfig, InventoryService};
//!
//! // INVENTORY_ENDPOINT_URL=https://... in the environment
//! let config = ClientConfig::load()?;
//! let service = InventoryService::from_config(&config)?;
//!
//! for case in service.list_cases().await? {
//!     println!("{}: {:?}", case, service.list_components(&case).await?);
//! }
//!
//! let outcome = service.borrow("u1", "Case A", "Widget", 2).await?;
//! println!("{}", outcome.message);
//!
//! // Fresh read: the borrow evicted the cached stock listing
//! let stock = service.get_live_stock().await?;
//! ```
//!
//! ## Testing Without a Network
//!
//! Implement [`Transport`] for a scripted fake and pass it to
//! [`InventoryService::new`] together with an [`InMemoryBackend`].

#[macro_use]
extern crate log;

pub mod backend;
pub mod config;
pub mod error;
pub mod expander;
pub mod key;
pub mod model;
pub mod observability;
pub mod service;
pub mod strategy;
pub mod transport;
pub mod validate;

// Re-exports for convenience
pub use backend::{CacheBackend, InMemoryBackend};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use expander::CacheExpander;
pub use model::{Holding, StockItem, TransactionResult};
pub use service::InventoryService;
pub use strategy::CacheStrategy;
pub use transport::{HttpTransport, Transport};
pub use validate::Quantity;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
