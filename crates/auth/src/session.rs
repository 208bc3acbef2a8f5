//! The session state machine and the one-shot bootstrap guard.

use thiserror::Error;

use crate::claims::TokenClaims;

/// Where the session is in its lifecycle.
///
/// `Loading -> {Authenticated, Unauthenticated}` at bootstrap;
/// `Authenticated -> Authenticated` on refresh (token replaced);
/// `Authenticated -> Unauthenticated` on logout;
/// `Unauthenticated -> Authenticated` on a completed interactive login.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Bootstrap progress, modeled as a transition guard rather than a flag:
/// the provider handshake is not safe to run twice against the same client,
/// so `begin` is only legal from `NotStarted`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BootstrapState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The bootstrap handshake was already started (or finished).
    #[error("session bootstrap already started")]
    AlreadyBootstrapped,

    /// A completion was signalled without a bootstrap in progress.
    #[error("session bootstrap not in progress")]
    BootstrapNotStarted,

    /// The operation needs an authenticated session.
    #[error("session is not authenticated")]
    NotAuthenticated,
}

/// The page-lifetime session record.
///
/// Owned by a [`SessionContext`](crate::SessionContext); mutated only through
/// its lifecycle methods, never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: SessionPhase,
    bootstrap: BootstrapState,
    token: Option<String>,
    claims: Option<TokenClaims>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn bootstrap_state(&self) -> BootstrapState {
        self.bootstrap
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// The current bearer token, present only while authenticated.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        self.claims.as_ref()
    }

    /// Enter the bootstrap handshake. Legal exactly once.
    pub fn begin_bootstrap(&mut self) -> Result<(), SessionError> {
        match self.bootstrap {
            BootstrapState::NotStarted => {
                self.bootstrap = BootstrapState::InProgress;
                self.phase = SessionPhase::Loading;
                Ok(())
            }
            BootstrapState::InProgress | BootstrapState::Completed => {
                Err(SessionError::AlreadyBootstrapped)
            }
        }
    }

    /// Leave the bootstrap handshake, clearing the loading phase.
    ///
    /// When the handshake did not authenticate, the phase drops to
    /// `Unauthenticated`; a successful handshake will already have moved it
    /// to `Authenticated` via [`Session::authenticate`].
    pub fn complete_bootstrap(&mut self) -> Result<bool, SessionError> {
        if self.bootstrap != BootstrapState::InProgress {
            return Err(SessionError::BootstrapNotStarted);
        }
        self.bootstrap = BootstrapState::Completed;
        if self.phase == SessionPhase::Loading {
            self.phase = SessionPhase::Unauthenticated;
        }
        Ok(self.is_authenticated())
    }

    /// A handshake produced a token: the session becomes authenticated.
    pub fn authenticate(&mut self, token: String, claims: TokenClaims) {
        self.phase = SessionPhase::Authenticated;
        self.token = Some(token);
        self.claims = Some(claims);
    }

    /// A refresh produced a new token; phase must already be authenticated.
    pub fn replace_token(&mut self, token: String, claims: TokenClaims) -> Result<(), SessionError> {
        if !self.is_authenticated() {
            return Err(SessionError::NotAuthenticated);
        }
        self.token = Some(token);
        self.claims = Some(claims);
        Ok(())
    }

    /// End the session. Idempotent; always lands in `Unauthenticated`.
    pub fn clear(&mut self) {
        self.phase = SessionPhase::Unauthenticated;
        self.token = None;
        self.claims = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superstore_core::SubjectId;

    fn claims() -> TokenClaims {
        TokenClaims {
            sub: "6f1c1a2e-0f4e-4a8c-9d3e-5b6a7c8d9e0f"
                .parse::<SubjectId>()
                .unwrap(),
            preferred_username: Some("admin".to_string()),
            email: None,
            iat: 100,
            exp: 400,
        }
    }

    #[test]
    fn starts_loading_and_not_bootstrapped() {
        let session = Session::new();
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert_eq!(session.bootstrap_state(), BootstrapState::NotStarted);
        assert!(session.token().is_none());
    }

    #[test]
    fn bootstrap_is_one_shot() {
        let mut session = Session::new();
        session.begin_bootstrap().unwrap();
        assert_eq!(
            session.begin_bootstrap(),
            Err(SessionError::AlreadyBootstrapped)
        );
        session.complete_bootstrap().unwrap();
        assert_eq!(
            session.begin_bootstrap(),
            Err(SessionError::AlreadyBootstrapped)
        );
    }

    #[test]
    fn complete_without_begin_is_an_error() {
        let mut session = Session::new();
        assert_eq!(
            session.complete_bootstrap(),
            Err(SessionError::BootstrapNotStarted)
        );
    }

    #[test]
    fn failed_bootstrap_clears_loading() {
        let mut session = Session::new();
        session.begin_bootstrap().unwrap();
        let authenticated = session.complete_bootstrap().unwrap();
        assert!(!authenticated);
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn successful_bootstrap_keeps_authenticated_phase() {
        let mut session = Session::new();
        session.begin_bootstrap().unwrap();
        session.authenticate("tok".to_string(), claims());
        let authenticated = session.complete_bootstrap().unwrap();
        assert!(authenticated);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn refresh_replaces_token_without_phase_change() {
        let mut session = Session::new();
        session.authenticate("old".to_string(), claims());
        session
            .replace_token("new".to_string(), claims())
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::Authenticated);
        assert_eq!(session.token(), Some("new"));
    }

    #[test]
    fn refresh_requires_authenticated_phase() {
        let mut session = Session::new();
        assert_eq!(
            session.replace_token("new".to_string(), claims()),
            Err(SessionError::NotAuthenticated)
        );
    }

    #[test]
    fn clear_drops_token_and_claims() {
        let mut session = Session::new();
        session.authenticate("tok".to_string(), claims());
        session.clear();
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(session.token().is_none());
        assert!(session.claims().is_none());

        // Idempotent.
        session.clear();
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }
}
