//! `superstore-core`: shared foundations for the admin client.
//!
//! Pure primitives only (error model, typed identifiers); no HTTP, no
//! provider integration.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{RecordId, SubjectId};
