//! Page fetcher
//!
//! One authenticated GET against the App Store Connect API, decoded into a
//! [`Page`]. Retries are the transport's business; this layer only classifies
//! the outcome.

use super::client::{HttpClient, RequestConfig, RequestSigner};
use crate::error::{Error, Result};
use crate::pagination::Page;
use crate::types::{JsonValue, QueryParams};
use std::sync::Arc;
use tracing::debug;

/// App Store Connect API root
pub const API_BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1/";

/// Fetches single pages from the API
#[derive(Debug)]
pub struct PageFetcher {
    client: HttpClient,
}

impl PageFetcher {
    /// Create a fetcher on top of a configured transport
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Fetch one page, signing each attempt with `signer`.
    ///
    /// 401 and 403 become [`Error::Authorization`] with the response body.
    /// Every other failure (status, network, undecodable body) is a
    /// transport-class error.
    pub async fn fetch(
        &self,
        path: &str,
        query: &QueryParams,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Page> {
        debug!(url = %self.client.build_url(path), ?query, "Fetching page");

        let config = RequestConfig::new()
            .query_pairs(query.iter().cloned())
            .signer(signer);

        let response = self
            .client
            .get_with_config(path, config)
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify(Error::http_status(status.as_u16(), body)));
        }

        let json: JsonValue = serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        Ok(Page::from_body(&json))
    }
}

/// Turn rejected credentials into an authorization error
fn classify(err: Error) -> Error {
    match err {
        Error::HttpStatus {
            status: status @ (401 | 403),
            body,
        } => Error::authorization(status, body),
        other => other,
    }
}
