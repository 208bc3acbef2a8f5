//! Token endpoint wire types.

use serde::Deserialize;

/// A successful response from the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,

    /// Access-token lifetime in seconds, advisory; the authoritative expiry
    /// is the `exp` claim inside the token.
    #[serde(default)]
    pub expires_in: Option<i64>,

    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub id_token: Option<String>,

    #[serde(default)]
    pub scope: Option<String>,
}
