use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Coarse classification of an error, independent of any transport.
///
/// Validation logic only ever decides the class; how a class is rendered
/// (HTTP status, exit code) is decided by the edge that owns the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The caller sent something invalid; retrying the same input fails again
    Validation,
    /// The addressed record does not exist
    NotFound,
    /// The request collides with existing state
    Conflict,
    /// Anything the caller cannot fix
    Internal,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Validation => "validation_error",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Conflict => "conflict",
            ErrorClass::Internal => "internal_error",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-level error for binaries and startup code
#[derive(Error, Debug)]
pub enum CertStoreError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server configuration errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CertStoreError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CertStoreError::ConfigError(_) => ErrorClass::Validation,
            _ => ErrorClass::Internal,
        }
    }
}

/// Result type alias for CertStore process-level operations
pub type Result<T> = std::result::Result<T, CertStoreError>;
