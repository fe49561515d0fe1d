//! Persistence for CertStore
//!
//! Repository traits for users and their certificates, plus an in-memory
//! implementation. Certificates are stored as validated records keyed by
//! their content-addressed Id and scoped to the owning user; deleting a user
//! deletes its certificates.

pub mod error;
pub mod models;
pub mod repository;

pub use error::*;
pub use models::*;
pub use repository::*;
