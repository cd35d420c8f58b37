#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::unused_async)]

//! # App Store Connect Source
//!
//! Extracts apps and customer reviews from the App Store Connect API.
//!
//! ## Features
//!
//! - **ES256 JWT Auth**: A fresh two-minute token for every request
//! - **Cursor Pagination**: Replays the server's `links.next` query verbatim
//! - **Parent/Child Streams**: Reviews are read app by app
//! - **Retry and Rate Limiting**: Backoff on 429/5xx, token bucket limiter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use app_store_connect_source::{AppStoreConnectSource, SourceConfig, Result};
//! use futures::TryStreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SourceConfig::load("config.json")?;
//!     let source = AppStoreConnectSource::new();
//!
//!     let status = source.check_connection(&config).await;
//!     assert!(status.success);
//!
//!     let streams = source.build_streams(&config)?;
//!     let reviews: Vec<_> = streams.customer_reviews.records().try_collect().await?;
//!     println!("{} reviews", reviews.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Connector Interface                      │
//! │  spec()   check()   discover()   read(streams) → Messages    │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬────────────┬─────┴────────┬──────────────────────┐
//! │   Auth   │    HTTP    │   Paginate   │       Partition      │
//! ├──────────┼────────────┼──────────────┼──────────────────────┤
//! │ ES256    │ Fetcher    │ links.next   │ Parent stream        │
//! │ JWT      │ Retry      │ cursor       │ Fixed app id         │
//! │          │ Rate Limit │              │                      │
//! └──────────┴────────────┴──────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// JWT token issuing
pub mod auth;

/// HTTP client with retry and rate limiting, and the page fetcher
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Partition routing
pub mod partition;

/// Paginated and parented streams
pub mod stream;

/// Source configuration
pub mod config;

/// Connector trait and messages
pub mod connector;

/// The App Store Connect source
pub mod source;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_keys;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::SourceConfig;
pub use connector::{CheckResult, Connector, Message};
pub use error::{Error, Result};
pub use source::{AppStoreConnectSource, Streams};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
