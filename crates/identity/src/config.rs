//! Provider connection parameters and realm endpoint layout.

/// Connection parameters for the identity provider.
///
/// Endpoint URLs follow the Keycloak realm layout:
/// `{server}/realms/{realm}/protocol/openid-connect/{auth,token,logout}`.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Provider base URL, e.g. `http://localhost:8080`.
    pub server_url: String,

    /// Authentication domain scoping users and clients.
    pub realm: String,

    /// The public client this application is registered as.
    pub client_id: String,

    /// Static redirect target used by the login handshake and silent
    /// re-authentication.
    pub redirect_uri: String,

    /// Refresh skew: a token expiring within this many seconds is refreshed.
    pub min_token_validity_secs: i64,

    /// Whether a failed token refresh forces a logout. The upstream default
    /// leaves the session authenticated and only logs the failure.
    pub logout_on_refresh_failure: bool,
}

impl IdentityConfig {
    pub fn new(
        server_url: impl Into<String>,
        realm: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            realm: realm.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            min_token_validity_secs: 30,
            logout_on_refresh_failure: false,
        }
    }

    /// Read connection parameters from the environment, with logged dev
    /// defaults for local runs against a stock Keycloak.
    pub fn from_env() -> Self {
        Self::new(
            env_or("IDP_SERVER_URL", "http://localhost:8080"),
            env_or("IDP_REALM", "superstore"),
            env_or("IDP_CLIENT_ID", "superstore-admin"),
            env_or(
                "IDP_REDIRECT_URI",
                "http://localhost:5173/silent-check-sso.html",
            ),
        )
    }

    pub fn with_logout_on_refresh_failure(mut self, enabled: bool) -> Self {
        self.logout_on_refresh_failure = enabled;
        self
    }

    fn realm_base(&self) -> String {
        format!(
            "{}/realms/{}",
            self.server_url.trim_end_matches('/'),
            self.realm
        )
    }

    pub fn authorization_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/auth", self.realm_base())
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/token", self.realm_base())
    }

    pub fn logout_endpoint(&self) -> String {
        format!("{}/protocol/openid-connect/logout", self.realm_base())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        tracing::warn!("{} not set; using dev default {:?}", key, default);
        default.to_string()
    })
}
