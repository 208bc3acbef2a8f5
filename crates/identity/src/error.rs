use thiserror::Error;

use superstore_auth::{ClaimsError, SessionError};

/// Errors from the identity-provider integration.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Illegal session transition (double bootstrap, refresh while logged
    /// out, ...).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The provider returned a token whose claims could not be read.
    #[error("token claims: {0}")]
    Claims(#[from] ClaimsError),

    /// The provider could not be reached.
    #[error("provider request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered but rejected the grant.
    #[error("provider rejected the grant ({status}): {body}")]
    Grant { status: u16, body: String },

    /// There is no provider session (refresh token) to work with.
    #[error("no provider session to recover")]
    NoProviderSession,

    /// `complete_login` was called without a login in progress.
    #[error("no login in progress")]
    NoPendingLogin,

    /// The returned `state` does not match the pending login.
    #[error("login state mismatch")]
    LoginStateMismatch,

    /// The operation needs an authenticated session.
    #[error("session is not authenticated")]
    NotAuthenticated,
}
