//! HTTP module
//!
//! Transport with retry, rate limiting and backoff, plus the page fetcher
//! that speaks the App Store Connect response format on top of it.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Error Classification**: 401/403 are authorization failures, the rest
//!   are transport failures

mod client;
mod fetcher;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, RequestSigner,
};
pub use fetcher::{PageFetcher, API_BASE_URL};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
