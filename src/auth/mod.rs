//! Authentication module
//!
//! App Store Connect authenticates every request with a short-lived ES256
//! JWT signed by the team's API key.
//!
//! The `TokenIssuer` signs a fresh token for each call. Tokens are never
//! cached: their two-minute validity window is shorter than a long sync.

mod issuer;
mod types;

pub use issuer::{TokenIssuer, AUDIENCE, TOKEN_LIFETIME_SECONDS};
pub use types::{AuthToken, Credentials, TokenClaims};
