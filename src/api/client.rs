use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use url::Url;

use super::CategoryMap;

/// Maximum category document size. The map is a small hand-curated
/// document on the backend; anything past this is a misconfigured server,
/// not data worth buffering.
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Errors that can occur fetching the category map.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not a valid category document
    #[error("Malformed category document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Response body exceeded the 2 MiB size limit
    #[error("Response too large")]
    ResponseTooLarge,
}

/// Client for the backend categories endpoint.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference-counted,
/// so spawned fetch tasks each take their own handle.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Builds a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend cannot be
    /// initialized.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("channelnav/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/api/categories",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Fetches the category map.
    ///
    /// One request, no retry and no caching. The backend is expected to
    /// serve the same document for the lifetime of a session, so callers
    /// may invoke this repeatedly and treat each result as current.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] - request exceeded the configured timeout
    /// - [`FetchError::Network`] - connection or TLS failure
    /// - [`FetchError::HttpStatus`] - non-2xx response
    /// - [`FetchError::ResponseTooLarge`] - body over the 2 MiB cap
    /// - [`FetchError::Parse`] - body is not a valid category document
    pub async fn categories(&self) -> Result<CategoryMap, FetchError> {
        let response = tokio::time::timeout(self.timeout, self.http.get(self.endpoint()).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::Network)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus(response.status().as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_BODY_SIZE).await?;
        let map: CategoryMap = serde_json::from_slice(&bytes)?;
        tracing::debug!(categories = map.len(), "Fetched category map");
        Ok(map)
    }
}

/// Reads a response body, bailing out as soon as it exceeds `limit`.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: trust Content-Length when the server sends one.
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
