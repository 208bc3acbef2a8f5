use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use superstore_core::SubjectId;

/// Bearer-token claims the admin client cares about.
///
/// Decoded from the payload segment of the compact JWT the provider issues.
/// Signature verification is intentionally outside this crate: for a public
/// client the provider handshake is the trust anchor, the token is only
/// introspected for display and refresh-skew decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject / principal identifier.
    pub sub: SubjectId,

    /// Display name the provider knows the user by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

impl TokenClaims {
    /// Decode claims from a compact JWT without verifying the signature.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(ClaimsError::Malformed(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| ClaimsError::Malformed(format!("payload segment: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClaimsError::Malformed(format!("payload json: {}", e)))
    }

    /// Deterministically validate the claim time window.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ClaimsError> {
        if self.exp <= self.iat {
            return Err(ClaimsError::InvalidTimeWindow);
        }
        let now = now.timestamp();
        if now < self.iat {
            return Err(ClaimsError::NotYetValid);
        }
        if now >= self.exp {
            return Err(ClaimsError::Expired);
        }
        Ok(())
    }

    /// True when the token expires within `leeway_secs` of `now` (or has
    /// already expired). Drives the refresh-or-not decision.
    pub fn expires_within(&self, now: DateTime<Utc>, leeway_secs: i64) -> bool {
        self.exp - now.timestamp() <= leeway_secs
    }
}
