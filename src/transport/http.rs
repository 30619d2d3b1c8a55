//! reqwest-backed transport.

use super::Transport;
use crate::error::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Content type for POST bodies.
///
/// The backend rejects the CORS pre-flight that `application/json` would
/// trigger, so the JSON payload travels as plain text.
pub const POST_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// HTTP transport against a single endpoint URL.
///
/// Holds a reusable `reqwest::Client` (connection pooling). No timeout is
/// configured and nothing is retried.
///
/// # Example
///
/// ```no_run
/// use inventory_kit::transport::{HttpTransport, Transport};
///
/// #[tokio::main]
/// async fn main() -> inventory_kit::Result<()> {
///     let transport = HttpTransport::new(Some("https://example.com/exec".to_string()));
///     let cases: Vec<String> = transport.get(&[("action", "getCases")]).await?;
///     println!("{:?}", cases);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint_url: Option<String>,
}

impl HttpTransport {
    /// Create a transport for `endpoint_url`.
    ///
    /// A missing URL is accepted here; every request then fails with
    /// [`Error::Config`].
    pub fn new(endpoint_url: Option<String>) -> Self {
        Self::with_client(Client::new(), endpoint_url)
    }

    /// Create a transport reusing an existing client.
    pub fn with_client(client: Client, endpoint_url: Option<String>) -> Self {
        HttpTransport {
            client,
            endpoint_url,
        }
    }

    /// Configured endpoint URL, if any.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    fn endpoint(&self) -> Result<&str> {
        self.endpoint_url
            .as_deref()
            .ok_or_else(|| Error::Config("inventory endpoint URL is not configured".to_string()))
    }

    /// Check status, then decode the body as JSON.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            warn!("✗ Backend responded {} {}", status.as_u16(), status_text);
            return Err(Error::Transport {
                status: status.as_u16(),
                status_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("✗ Failed to decode backend response: {}", e);
            Error::Decode(e.to_string())
        })
    }
}

impl Transport for HttpTransport {
    async fn get<T>(&self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint()?;
        debug!("» GET {:?}", params);

        let response = self.client.get(url).query(params).send().await?;
        Self::decode(response).await
    }

    async fn post<B, T>(&self, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint()?;
        let payload =
            serde_json::to_string(body).map_err(|e| Error::Serialization(e.to_string()))?;
        debug!("» POST {}", payload);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, POST_CONTENT_TYPE)
            .body(payload)
            .send()
            .await?;
        Self::decode(response).await
    }
}
