//! Request validation utilities for consistent validation across handlers
//!
//! This module provides a `RequestValidation` trait, helper macros for field
//! checks, and the sanity checks applied to path identifiers.

use crate::error::{ApiError, ApiResult};
use certificate_engine::user::parse_user_id;
use certificate_engine::CertificateId;

/// Trait for validating request payloads
///
/// Implement this trait for create/update request types so every handler
/// rejects bad input the same way before touching storage.
///
/// # Example
///
/// ```rust,ignore
/// use certstore_server::validation::RequestValidation;
/// use certstore_server::error::ApiError;
///
/// struct RenameRequest {
///     name: String,
/// }
///
/// impl RequestValidation for RenameRequest {
///     fn validate(&self) -> Result<(), ApiError> {
///         validate_required!(self.name, "name is required");
///         Ok(())
///     }
/// }
/// ```
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```rust,ignore
/// validate_field!(self.id, self.id.is_empty(), "id may not be set");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
///
/// # Usage
///
/// ```rust,ignore
/// validate_required!(self.email, "email is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        if $field.trim().is_empty() {
            return Err($crate::error::ApiError::missing_field($message));
        }
    };
}

/// Parse a user Id taken from the URL.
///
/// Anything that is not a positive integer cannot name a stored user, so it
/// is reported as not found rather than as bad input.
pub fn user_id_from_path(raw: &str) -> ApiResult<u64> {
    parse_user_id(raw).map_err(|_| ApiError::not_found("User"))
}

/// Check a certificate Id taken from the URL.
///
/// Only lowercase hex SHA-256 digests can address a record.
pub fn cert_id_from_path(raw: &str) -> ApiResult<&str> {
    if CertificateId::is_well_formed(raw) {
        Ok(raw)
    } else {
        Err(ApiError::not_found("Certificate"))
    }
}
