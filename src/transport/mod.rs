//! Request helpers for the remote inventory endpoint.
//!
//! The backend exposes exactly two verbs against one URL: a parametrized GET
//! for reads and a JSON-body POST for writes. The [`Transport`] trait is the
//! seam between the cache layer and that endpoint, which keeps the rest of
//! the crate testable without a network.
//!
//! # Error Handling
//!
//! Implementations return:
//! - [`Error::Transport`](crate::Error::Transport) for any non-2xx status
//! - [`Error::Decode`](crate::Error::Decode) when the body is not the expected JSON
//! - [`Error::Network`](crate::Error::Network) when no response was obtained
//!
//! No implementation retries.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod http;

pub use http::HttpTransport;

/// Trait for backend transport implementations.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Issue a GET with the given query parameters and decode the JSON body.
    async fn get<T>(&self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned;

    /// Issue a POST carrying `body` as JSON and decode the JSON reply.
    async fn post<B, T>(&self, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned;
}
