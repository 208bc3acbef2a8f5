//! Authenticated REST client for the admin backend.
//!
//! Every request carries the current bearer token from the shared
//! [`SessionContext`](superstore_auth::SessionContext); a request attempted
//! without one fails closed (the session is logged out and nothing is sent).

pub mod error;
pub mod http;
pub mod products;
pub mod users;

pub use error::ApiError;
pub use http::RestClient;
