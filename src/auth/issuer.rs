//! Token issuer
//!
//! Signs App Store Connect JWTs with ES256.

use super::types::{AuthToken, Credentials, TokenClaims};
use crate::error::{Error, Result};
use crate::http::RequestSigner;
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::trace;

/// Audience claim required by App Store Connect
pub const AUDIENCE: &str = "appstoreconnect-v1";

/// Token validity window
pub const TOKEN_LIFETIME_SECONDS: i64 = 120;

/// Issues signed tokens from a fixed set of credentials.
///
/// Holds no state besides the credentials; every call to [`issue`](Self::issue)
/// is independent and reflects the current time.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    credentials: Credentials,
}

impl TokenIssuer {
    /// Create a new issuer
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Credentials used for signing
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Issue a token valid from now for [`TOKEN_LIFETIME_SECONDS`]
    pub fn issue(&self) -> Result<AuthToken> {
        self.issue_at(Utc::now())
    }

    /// Issue a token as of `now`
    pub fn issue_at(&self, now: DateTime<Utc>) -> Result<AuthToken> {
        let iat = now.timestamp();
        let claims = TokenClaims {
            iss: self.credentials.issuer_id.clone(),
            iat,
            exp: iat + TOKEN_LIFETIME_SECONDS,
            aud: AUDIENCE.to_string(),
        };

        let mut header = Header::new(Algorithm::ES256);
        header.typ = Some("JWT".to_string());
        header.kid = Some(self.credentials.key_id.clone());

        let encoding_key = EncodingKey::from_ec_pem(self.credentials.private_key.as_bytes())
            .map_err(|e| Error::signing(format!("Invalid private key: {e}")))?;

        let jwt = encode(&header, &claims, &encoding_key)
            .map_err(|e| Error::signing(format!("Failed to encode JWT: {e}")))?;

        trace!(kid = %self.credentials.key_id, exp = claims.exp, "Issued token");
        Ok(AuthToken::new(jwt, self.credentials.key_id.clone(), claims))
    }
}

impl RequestSigner for TokenIssuer {
    fn authorization(&self) -> Result<String> {
        Ok(self.issue()?.bearer())
    }
}
