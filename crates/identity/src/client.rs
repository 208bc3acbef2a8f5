//! The provider client: bootstrap, login, refresh, logout.

use chrono::Utc;
use parking_lot::Mutex;

use superstore_auth::{SessionContext, TokenClaims};

use crate::config::IdentityConfig;
use crate::error::IdentityError;
use crate::pkce::{self, PkceChallenge};
use crate::token::TokenResponse;

/// A login handshake waiting for its redirect to come back.
#[derive(Debug, Clone)]
struct PendingLogin {
    state: String,
    verifier: String,
}

/// Client for one identity-provider realm.
///
/// Construct once per process and share; the session context passed in is
/// the only place authentication state lives.
pub struct IdentityClient {
    http: reqwest::Client,
    config: IdentityConfig,
    session: SessionContext,
    /// The provider-session refresh token. Held here, never in the session:
    /// the session exposes only the bearer credential.
    refresh_token: Mutex<Option<String>>,
    pending_login: Mutex<Option<PendingLogin>>,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig, session: SessionContext) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
            refresh_token: Mutex::new(None),
            pending_login: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Run the startup handshake: a non-interactive attempt to recover an
    /// existing provider session. One-shot; a second call fails with
    /// `SessionError::AlreadyBootstrapped` without touching the provider.
    ///
    /// `provider_session` is the refresh token left over from a previous
    /// provider handshake, if any (the silent-SSO hint). With no hint, or
    /// when the provider rejects it, the session comes up unauthenticated
    /// and the user must log in interactively; the failure is not retried.
    ///
    /// Returns whether the session ended up authenticated.
    pub async fn bootstrap(
        &self,
        provider_session: Option<&str>,
    ) -> Result<bool, IdentityError> {
        self.session.begin_bootstrap()?;

        match provider_session {
            None => {
                tracing::debug!("no provider session hint; skipping silent sign-on");
            }
            Some(token) => match self.redeem_refresh_token(token).await {
                Ok((access_token, claims, refresh)) => {
                    *self.refresh_token.lock() = refresh;
                    self.session.authenticate(access_token, claims);
                    tracing::info!("silent sign-on recovered an existing session");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "silent sign-on check failed");
                    self.session.auth_error(e.to_string());
                }
            },
        }

        Ok(self.session.complete_bootstrap()?)
    }

    /// Build the interactive login URL (authorization code + PKCE S256) and
    /// remember the verifier/state for the redirect.
    pub fn login_url(&self) -> String {
        let challenge = PkceChallenge::generate();
        let state = pkce::random_urlsafe(32);

        let url = format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}&code_challenge={}&code_challenge_method={}",
            self.config.authorization_endpoint(),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode("openid profile email"),
            urlencoding::encode(&state),
            urlencoding::encode(&challenge.challenge),
            pkce::CHALLENGE_METHOD,
        );

        *self.pending_login.lock() = Some(PendingLogin {
            state,
            verifier: challenge.verifier,
        });

        url
    }

    /// Redeem the authorization code the redirect carried.
    pub async fn complete_login(&self, code: &str, state: &str) -> Result<(), IdentityError> {
        let pending = self
            .pending_login
            .lock()
            .take()
            .ok_or(IdentityError::NoPendingLogin)?;

        if pending.state != state {
            self.session.auth_error("login state mismatch");
            return Err(IdentityError::LoginStateMismatch);
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &self.config.redirect_uri),
            ("client_id", &self.config.client_id),
            ("code_verifier", &pending.verifier),
        ];

        match self.token_grant(&params).await {
            Ok(token) => {
                let (access_token, claims, refresh) = self.unpack(token)?;
                *self.refresh_token.lock() = refresh;
                self.session.authenticate(access_token, claims);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "login code redemption failed");
                self.session.auth_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Refresh the access token if it expires within `min_validity_secs`.
    ///
    /// Returns `false` when the current token is still good (no provider
    /// round-trip), `true` when it was replaced. A failed refresh is logged
    /// and emitted as `RefreshError`; it ends the session only when
    /// `logout_on_refresh_failure` is configured.
    pub async fn refresh(&self, min_validity_secs: i64) -> Result<bool, IdentityError> {
        let claims = self
            .session
            .claims()
            .ok_or(IdentityError::NotAuthenticated)?;

        let now = Utc::now();
        if !claims.expires_within(now, min_validity_secs) {
            tracing::debug!("token still valid; refresh not needed");
            return Ok(false);
        }
        if claims.expires_within(now, 0) {
            self.session.token_expired();
        }

        let refresh_token = self
            .refresh_token
            .lock()
            .clone()
            .ok_or(IdentityError::NoProviderSession)?;

        match self.redeem_refresh_token(&refresh_token).await {
            Ok((access_token, claims, refresh)) => {
                *self.refresh_token.lock() = refresh;
                self.session.refresh_succeeded(access_token, claims)?;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed");
                self.session.refresh_failed(e.to_string());
                if self.config.logout_on_refresh_failure {
                    self.logout().await;
                }
                Err(e)
            }
        }
    }

    /// End the session: best-effort back-channel logout at the provider
    /// (failures are logged, never surfaced), then clear local state.
    pub async fn logout(&self) {
        let refresh_token = self.refresh_token.lock().take();
        self.pending_login.lock().take();

        if let Some(token) = refresh_token {
            let params = [
                ("client_id", self.config.client_id.as_str()),
                ("refresh_token", token.as_str()),
            ];
            match self
                .http
                .post(self.config.logout_endpoint())
                .form(&params)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("provider session ended");
                }
                Ok(response) => {
                    tracing::warn!(status = %response.status(), "provider logout rejected");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "provider logout unreachable");
                }
            }
        }

        self.session.logout();
    }

    /// `grant_type=refresh_token` exchange at the token endpoint.
    async fn redeem_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<(String, TokenClaims, Option<String>), IdentityError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &self.config.client_id),
        ];
        let token = self.token_grant(&params).await?;
        self.unpack(token)
    }

    async fn token_grant(
        &self,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, IdentityError> {
        let response = self
            .http
            .post(self.config.token_endpoint())
            .form(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(IdentityError::Grant { status, body });
        }

        Ok(response.json().await?)
    }

    fn unpack(
        &self,
        token: TokenResponse,
    ) -> Result<(String, TokenClaims, Option<String>), IdentityError> {
        let claims = TokenClaims::decode(&token.access_token)?;
        Ok((token.access_token, claims, token.refresh_token))
    }
}
