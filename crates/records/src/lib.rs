//! `superstore-records`: the remote-owned record shapes.
//!
//! Products and users are owned by the backend; this crate holds the wire
//! shapes, the form-draft types, and submit-time validation. Uniqueness of
//! ids is enforced server-side, not here.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductDraft};
pub use user::{NewUser, User, UserDraft};
