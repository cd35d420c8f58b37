//! Auth types
//!
//! Credentials as supplied by configuration, and the signed token produced
//! from them.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// API key credentials issued by App Store Connect
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Key identifier (`kid` header)
    pub key_id: String,
    /// Issuer identifier (`iss` claim)
    pub issuer_id: String,
    /// EC private key, PEM encoded
    pub private_key: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(
        key_id: impl Into<String>,
        issuer_id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            issuer_id: issuer_id.into(),
            private_key: private_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("issuer_id", &self.issuer_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// JWT claims for App Store Connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer id
    pub iss: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Always [`AUDIENCE`](super::AUDIENCE)
    pub aud: String,
}

/// A signed bearer token
#[derive(Clone)]
pub struct AuthToken {
    token: String,
    key_id: String,
    claims: TokenClaims,
}

impl AuthToken {
    pub(crate) fn new(token: String, key_id: String, claims: TokenClaims) -> Self {
        Self {
            token,
            key_id,
            claims,
        }
    }

    /// Encoded JWT
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Key identifier from the token header
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Signed claims
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// When the token was issued
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.claims.iat, 0).single()
    }

    /// When the token stops being accepted
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.claims.exp, 0).single()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("key_id", &self.key_id)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}
