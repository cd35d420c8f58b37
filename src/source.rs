//! App Store Connect source
//!
//! Wires configuration into the two streams and exposes them through the
//! [`Connector`] trait.

use crate::auth::TokenIssuer;
use crate::config::SourceConfig;
use crate::connector::{
    Catalog, CatalogStream, CheckResult, Connector, ConnectorSpec, Message, MessageStream,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, PageFetcher};
use crate::partition::{ListRouter, ParentRouter, PartitionRouter, APP_ID_FIELD};
use crate::stream::{
    fuse_on_error, Apps, CustomerReviews, PaginatedStream, ParentedStream, SourceStream, APPS,
    CUSTOMER_REVIEWS,
};
use crate::types::JsonValue;
use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Prefix of every failed connection check
pub const CHECK_FAILURE_PREFIX: &str = "Unable to connect to the API with the provided credentials";

// ============================================================================
// Streams
// ============================================================================

/// The streams built from one configuration
#[derive(Debug, Clone)]
pub struct Streams {
    /// Every app visible to the API key
    pub apps: PaginatedStream,
    /// Reviews of each app, oldest first
    pub customer_reviews: ParentedStream,
}

impl Streams {
    /// All streams in declaration order; the first one is the probe target
    pub fn all(&self) -> Vec<SourceStream> {
        vec![
            SourceStream::from(self.apps.clone()),
            SourceStream::from(self.customer_reviews.clone()),
        ]
    }

    /// Look up a stream by name
    pub fn get(&self, name: &str) -> Option<SourceStream> {
        self.all().into_iter().find(|s| s.name() == name)
    }
}

// ============================================================================
// Source
// ============================================================================

/// The App Store Connect source
#[derive(Debug, Clone, Copy, Default)]
pub struct AppStoreConnectSource;

impl AppStoreConnectSource {
    /// Create the source
    pub fn new() -> Self {
        Self
    }

    /// Build the streams for a configuration.
    ///
    /// One issuer and one transport are shared by both streams. Reviews are
    /// partitioned by the configured `app_id` when present, otherwise by the
    /// ids the apps stream yields.
    pub fn build_streams(&self, config: &SourceConfig) -> Result<Streams> {
        let issuer = Arc::new(TokenIssuer::new(config.credentials()));
        let client = HttpClient::with_config(config.http_client_config())?;
        let fetcher = Arc::new(PageFetcher::new(client));

        let apps = PaginatedStream::new(
            Arc::new(Apps),
            Arc::clone(&issuer),
            Arc::clone(&fetcher),
            config.limit,
        );
        let reviews =
            PaginatedStream::new(Arc::new(CustomerReviews), issuer, fetcher, config.limit);

        let router: Arc<dyn PartitionRouter> = match &config.app_id {
            Some(app_id) => Arc::new(ListRouter::new(vec![app_id.clone()], APP_ID_FIELD)),
            None => Arc::new(ParentRouter::new(apps.clone(), APP_ID_FIELD)),
        };

        Ok(Streams {
            apps,
            customer_reviews: ParentedStream::new(reviews, router),
        })
    }

    /// Probe connectivity with a single page of the first stream.
    ///
    /// Never fails; every error becomes a failed [`CheckResult`].
    pub async fn check_connection(&self, config: &SourceConfig) -> CheckResult {
        info!("Checking connection");

        let probe = async {
            let streams = self.build_streams(config)?;
            streams.apps.first_page(None).await
        };

        match probe.await {
            Ok(records) => {
                info!(records = records.len(), "Connection check succeeded");
                CheckResult::success()
            }
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                CheckResult::failure(format!("{CHECK_FAILURE_PREFIX} - {e}"))
            }
        }
    }

    /// JSON schema of the configuration
    fn connection_specification() -> JsonValue {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "App Store Connect Spec",
            "type": "object",
            "required": ["auth_key_id", "auth_issuer_id", "auth_private_key", "limit"],
            "properties": {
                "auth_key_id": {
                    "type": "string",
                    "title": "Key ID",
                    "description": "Key identifier of the App Store Connect API key"
                },
                "auth_issuer_id": {
                    "type": "string",
                    "title": "Issuer ID",
                    "description": "Issuer identifier from the API keys page"
                },
                "auth_private_key": {
                    "type": "string",
                    "title": "Private Key",
                    "description": "Contents of the .p8 private key file",
                    "secret": true,
                    "multiline": true
                },
                "limit": {
                    "type": "integer",
                    "title": "Page Size",
                    "minimum": 1,
                    "maximum": 200
                },
                "app_id": {
                    "type": ["string", "integer"],
                    "title": "App ID",
                    "description": "Only read reviews of this app"
                }
            }
        })
    }
}

#[async_trait]
impl Connector for AppStoreConnectSource {
    fn spec(&self) -> ConnectorSpec {
        ConnectorSpec {
            name: "app-store-connect".to_string(),
            title: "App Store Connect".to_string(),
            description: Some("Apps and customer reviews from App Store Connect".to_string()),
            connection_specification: Self::connection_specification(),
            documentation_url: Some(
                "https://developer.apple.com/documentation/appstoreconnectapi".to_string(),
            ),
        }
    }

    async fn check(&self, config: &JsonValue) -> Result<CheckResult> {
        match SourceConfig::from_value(config) {
            Ok(config) => Ok(self.check_connection(&config).await),
            Err(e) => Ok(CheckResult::failure(format!("Invalid configuration: {e}"))),
        }
    }

    async fn discover(&self, config: &JsonValue) -> Result<Catalog> {
        SourceConfig::from_value(config)?;

        Ok(Catalog {
            streams: vec![
                CatalogStream::new(APPS),
                CatalogStream::new(CUSTOMER_REVIEWS).with_parent(APPS),
            ],
        })
    }

    async fn read(&self, config: &JsonValue, streams: &[String]) -> Result<MessageStream> {
        let config = SourceConfig::from_value(config)?;
        let built = self.build_streams(&config)?;

        let selected = if streams.is_empty() {
            built.all()
        } else {
            streams
                .iter()
                .map(|name| {
                    built.get(name).ok_or_else(|| Error::StreamNotFound {
                        stream: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        let names: Vec<_> = selected.iter().map(SourceStream::name).collect();
        info!(streams = ?names, "Starting read");

        let messages = stream::iter(selected)
            .map(|source| {
                let name = source.name();
                stream::once(future::ready(Ok(Message::info(format!(
                    "Reading stream: {name}"
                )))))
                .chain(source.messages())
            })
            .flatten();

        Ok(fuse_on_error(messages.boxed()))
    }
}
