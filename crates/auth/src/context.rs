//! The shared session holder.
//!
//! One `SessionContext` is created per process and passed explicitly to the
//! identity client, the REST client, and the shell; there is no module-level
//! singleton. All mutation goes through the lifecycle methods here, which
//! update the session under a short-lived lock and then fan the matching
//! [`SessionEvent`] out to subscribers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::claims::TokenClaims;
use crate::events::SessionEvent;
use crate::session::{Session, SessionError, SessionPhase};

type Hook = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Cheaply clonable handle to the process-wide session state.
#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    session: RwLock<Session>,
    hooks: RwLock<Vec<Hook>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lifecycle hook. Hooks run synchronously, in registration
    /// order, after the state change they describe has been applied.
    pub fn on_event(&self, hook: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.inner.hooks.write().push(Box::new(hook));
    }

    fn emit(&self, event: SessionEvent) {
        let hooks = self.inner.hooks.read();
        for hook in hooks.iter() {
            hook(&event);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> T {
        f(&self.inner.session.read())
    }

    fn write<T>(&self, f: impl FnOnce(&mut Session) -> T) -> T {
        f(&mut self.inner.session.write())
    }

    pub fn phase(&self) -> SessionPhase {
        self.read(|s| s.phase())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|s| s.is_authenticated())
    }

    /// Snapshot of the current bearer token, if authenticated.
    pub fn bearer_token(&self) -> Option<String> {
        self.read(|s| s.token().map(str::to_string))
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        self.read(|s| s.claims().cloned())
    }

    /// Enter the bootstrap handshake (one-shot; see [`SessionError`]).
    pub fn begin_bootstrap(&self) -> Result<(), SessionError> {
        self.write(|s| s.begin_bootstrap())
    }

    /// Finish the bootstrap handshake and emit `Ready`.
    pub fn complete_bootstrap(&self) -> Result<bool, SessionError> {
        let authenticated = self.write(|s| s.complete_bootstrap())?;
        self.emit(SessionEvent::Ready { authenticated });
        Ok(authenticated)
    }

    /// A handshake produced a token: become authenticated, emit `AuthSuccess`.
    pub fn authenticate(&self, token: String, claims: TokenClaims) {
        self.write(|s| s.authenticate(token, claims));
        self.emit(SessionEvent::AuthSuccess);
    }

    /// A handshake failed; emits `AuthError`. Phase is untouched here; the
    /// bootstrap completion (or the caller) decides where the session lands.
    pub fn auth_error(&self, reason: impl Into<String>) {
        self.emit(SessionEvent::auth_error(reason));
    }

    /// A refresh produced a new token: replace it in place, emit
    /// `RefreshSuccess`. Phase stays `Authenticated`.
    pub fn refresh_succeeded(&self, token: String, claims: TokenClaims) -> Result<(), SessionError> {
        self.write(|s| s.replace_token(token, claims))?;
        self.emit(SessionEvent::RefreshSuccess);
        Ok(())
    }

    /// A refresh failed; emits `RefreshError` and leaves the session alone.
    pub fn refresh_failed(&self, reason: impl Into<String>) {
        self.emit(SessionEvent::refresh_error(reason));
    }

    /// The access token passed its expiry.
    pub fn token_expired(&self) {
        self.emit(SessionEvent::TokenExpired);
    }

    /// End the session and emit `Logout`.
    pub fn logout(&self) {
        self.write(|s| s.clear());
        self.emit(SessionEvent::Logout);
    }
}
