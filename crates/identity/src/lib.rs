//! `superstore-identity`: the identity-provider client.
//!
//! Wraps the provider's OpenID Connect endpoints (Keycloak realm layout)
//! for a public client: silent SSO recovery at startup, interactive login
//! via authorization code + PKCE, in-place token refresh, and back-channel
//! logout. All session state flows through the `SessionContext` passed in
//! at construction.

pub mod client;
pub mod config;
pub mod error;
pub mod pkce;
pub mod token;

pub use client::IdentityClient;
pub use config::IdentityConfig;
pub use error::IdentityError;
pub use pkce::PkceChallenge;
pub use token::TokenResponse;
