//! `superstore-auth`: pure session domain for the admin client.
//!
//! This crate is intentionally decoupled from HTTP and from the identity
//! provider: it models the session state machine, the one-shot bootstrap
//! guard, bearer-token claims, and the lifecycle events everything else
//! reacts to. The provider integration lives in `superstore-identity`.

pub mod claims;
pub mod context;
pub mod events;
pub mod session;

pub use claims::{ClaimsError, TokenClaims};
pub use context::SessionContext;
pub use events::SessionEvent;
pub use session::{BootstrapState, Session, SessionError, SessionPhase};
