//! Source configuration
//!
//! The user-supplied settings: App Store Connect API credentials, page size,
//! an optional app id, and optional transport overrides.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, API_BASE_URL};
use crate::types::JsonValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Source Config
// ============================================================================

/// Configuration accepted by check, discover and read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// API key id, sent as the JWT `kid` header
    pub auth_key_id: String,

    /// Issuer id, sent as the JWT `iss` claim
    pub auth_issuer_id: String,

    /// PEM-encoded EC private key
    #[serde(deserialize_with = "deserialize_private_key")]
    pub auth_private_key: String,

    /// Records per page
    pub limit: u32,

    /// Read reviews of this app only instead of every app
    #[serde(default, deserialize_with = "deserialize_app_id")]
    pub app_id: Option<String>,

    /// Transport overrides
    #[serde(default)]
    pub http: HttpSettings,
}

/// Transport overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// API root; every request path is joined onto it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries for 429, 5xx, timeouts and connection errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Request rate ceiling; 0 disables rate limiting
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_rps(),
        }
    }
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rps() -> u32 {
    10
}

/// Private keys pasted into a single-line field arrive with escaped newlines
fn deserialize_private_key<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let key = String::deserialize(deserializer)?;
    Ok(key.replace("\\n", "\n"))
}

/// App ids are numeric strings but often get written as bare numbers
fn deserialize_app_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.trim().to_string())),
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "app_id must be a string or number, got {other}"
        ))),
    }
}

impl SourceConfig {
    /// Load from a JSON or YAML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_value(&Self::read_value(path)?)
    }

    /// Read a JSON or YAML file without interpreting it
    pub fn read_value<P: AsRef<Path>>(path: P) -> Result<JsonValue> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            _ => Ok(serde_json::from_str(&content)?),
        }
    }

    /// Parse an inline JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert an already parsed JSON value
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let config: Self = serde_json::from_value(value.clone())?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("auth_key_id", &self.auth_key_id),
            ("auth_issuer_id", &self.auth_issuer_id),
            ("auth_private_key", &self.auth_private_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        if self.limit == 0 {
            return Err(Error::invalid_value("limit", "must be a positive integer"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be a positive integer",
            ));
        }

        if self.http.base_url.trim().is_empty() {
            return Err(Error::invalid_value("http.base_url", "must not be empty"));
        }

        Ok(())
    }

    /// Signing credentials
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.auth_key_id.clone(),
            self.auth_issuer_id.clone(),
            self.auth_private_key.clone(),
        )
    }

    /// Transport configuration
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.http.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries);

        builder = if self.http.requests_per_second == 0 {
            builder.no_rate_limit()
        } else {
            builder.rate_limit(RateLimiterConfig::per_second(
                self.http.requests_per_second,
            ))
        };

        builder.build()
    }
}
