//! Signed session tokens carried in the `wigle_session` cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Configured username the session was issued to
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    fn for_user(username: &str, lifetime: Duration) -> Self {
        let issued = Utc::now();
        Self {
            sub: username.to_string(),
            iat: issued.timestamp(),
            exp: (issued + lifetime).timestamp(),
        }
    }
}

/// Issues an HS256 token for `username` that expires after `auth.session_expiry_hours`.
pub fn issue_session(username: &str, auth: &AuthConfig) -> Result<String> {
    let lifetime = Duration::hours(auth.session_expiry_hours as i64);
    let claims = SessionClaims::for_user(username, lifetime);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(auth.session_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign session token: {}", e)))
}

/// Checks signature, algorithm and expiry.
pub fn verify_session(token: &str, secret: &str) -> Result<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::Session(e.to_string()))
}
