//! Session lifecycle events.
//!
//! Every session mutation is announced through one of these; subscribers on
//! the [`SessionContext`](crate::SessionContext) observe them in the order
//! they were applied.

/// A session lifecycle event, mirroring the provider callback surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The bootstrap handshake finished, with or without a recovered session.
    Ready { authenticated: bool },

    /// An authentication handshake succeeded; the session now holds a token.
    AuthSuccess,

    /// An authentication handshake failed.
    AuthError { reason: String },

    /// A token refresh succeeded; the token was replaced in place.
    RefreshSuccess,

    /// A token refresh failed. Whether this forces a logout is a policy
    /// decision made by the identity client, not here.
    RefreshError { reason: String },

    /// The access token passed its expiry; a refresh is due.
    TokenExpired,

    /// The session ended (user action or forced).
    Logout,
}

impl SessionEvent {
    pub fn auth_error(reason: impl Into<String>) -> Self {
        Self::AuthError {
            reason: reason.into(),
        }
    }

    pub fn refresh_error(reason: impl Into<String>) -> Self {
        Self::RefreshError {
            reason: reason.into(),
        }
    }
}
