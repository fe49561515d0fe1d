use error_common::{codes, ErrorClass};
use std::fmt;
use thiserror::Error;

/// Which wire field a PEM-level failure was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemField {
    Certificate,
    PrivateKey,
}

impl fmt::Display for PemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PemField::Certificate => f.write_str("cert"),
            PemField::PrivateKey => f.write_str("key"),
        }
    }
}

/// Public-key algorithm family, used in key-size errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Rsa,
    Ec,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => f.write_str("RSA"),
            KeyAlgorithm::Ec => f.write_str("EC"),
        }
    }
}

/// Every way turning a wire certificate into a record can fail.
///
/// The set is closed: callers can match exhaustively and receive exactly one
/// variant per failed operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CertError {
    #[error("Invalid PEM block in `{field}`: include exactly one PEM block per field ({segments} segments found, expected 5)")]
    InvalidPemBlock { field: PemField, segments: usize },

    #[error("Invalid certificate: {reason}")]
    InvalidCertificatePem { reason: String },

    #[error("No private key provided{}", found_label(.found))]
    MissingPrivateKey { found: Option<String> },

    #[error("DSA is not supported, use RSA or ECDSA")]
    DsaNotSupported,

    #[error("Invalid private key: {reason}")]
    InvalidPrivateKey { reason: String },

    #[error("Invalid certificate ID: expected {expected} (hex-encoded SHA-256 of the DER certificate), got {supplied}")]
    InvalidCertificateId { expected: String, supplied: String },

    #[error("{algorithm} key of {bits} bits is too small, a minimum of {minimum} bits is required")]
    KeyTooSmall {
        algorithm: KeyAlgorithm,
        bits: usize,
        minimum: usize,
    },

    #[error("Certificate verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("Malformed encoding in `{field}`: {reason}")]
    MalformedEncoding { field: PemField, reason: String },
}

fn found_label(found: &Option<String>) -> String {
    match found {
        Some(label) => format!(" (found PEM block of type \"{}\")", label),
        None => String::new(),
    }
}

/// Fieldless mirror of [`CertError`] for tables and metrics labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPemBlock,
    InvalidCertificatePem,
    MissingPrivateKey,
    DsaNotSupported,
    InvalidPrivateKey,
    InvalidCertificateId,
    KeyTooSmall,
    VerificationFailed,
    MalformedEncoding,
}

impl ErrorKind {
    /// Stable client-facing error code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPemBlock => codes::certificate::INVALID_PEM_BLOCK,
            ErrorKind::InvalidCertificatePem => codes::certificate::INVALID_CERTIFICATE_PEM,
            ErrorKind::MissingPrivateKey => codes::certificate::MISSING_PRIVATE_KEY,
            ErrorKind::DsaNotSupported => codes::certificate::DSA_NOT_SUPPORTED,
            ErrorKind::InvalidPrivateKey => codes::certificate::INVALID_PRIVATE_KEY,
            ErrorKind::InvalidCertificateId => codes::certificate::INVALID_CERTIFICATE_ID,
            ErrorKind::KeyTooSmall => codes::certificate::KEY_TOO_SMALL,
            ErrorKind::VerificationFailed => codes::certificate::VERIFICATION_FAILED,
            ErrorKind::MalformedEncoding => codes::certificate::MALFORMED_ENCODING,
        }
    }

    /// Every certificate failure is caused by the submitted material.
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorKind::InvalidPemBlock
            | ErrorKind::InvalidCertificatePem
            | ErrorKind::MissingPrivateKey
            | ErrorKind::DsaNotSupported
            | ErrorKind::InvalidPrivateKey
            | ErrorKind::InvalidCertificateId
            | ErrorKind::KeyTooSmall
            | ErrorKind::VerificationFailed
            | ErrorKind::MalformedEncoding => ErrorClass::Validation,
        }
    }
}

impl CertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CertError::InvalidPemBlock { .. } => ErrorKind::InvalidPemBlock,
            CertError::InvalidCertificatePem { .. } => ErrorKind::InvalidCertificatePem,
            CertError::MissingPrivateKey { .. } => ErrorKind::MissingPrivateKey,
            CertError::DsaNotSupported => ErrorKind::DsaNotSupported,
            CertError::InvalidPrivateKey { .. } => ErrorKind::InvalidPrivateKey,
            CertError::InvalidCertificateId { .. } => ErrorKind::InvalidCertificateId,
            CertError::KeyTooSmall { .. } => ErrorKind::KeyTooSmall,
            CertError::VerificationFailed { .. } => ErrorKind::VerificationFailed,
            CertError::MalformedEncoding { .. } => ErrorKind::MalformedEncoding,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub fn class(&self) -> ErrorClass {
        self.kind().class()
    }

    pub(crate) fn malformed(field: PemField, reason: impl fmt::Display) -> Self {
        CertError::MalformedEncoding {
            field,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_key(reason: impl Into<String>) -> Self {
        CertError::InvalidPrivateKey {
            reason: reason.into(),
        }
    }
}

pub type CertResult<T> = Result<T, CertError>;

/// Failures while validating a user aggregate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid user: the user ID `{0}` is not a positive integer")]
    InvalidId(String),

    #[error("Invalid user: the name is {length} characters long, the maximum is {max}")]
    NameTooLong { length: usize, max: usize },

    #[error("Invalid user: the email address is malformed")]
    InvalidEmail,

    #[error("Certificate #{index}: {source}")]
    Certificate {
        index: usize,
        #[source]
        source: CertError,
    },
}

impl UserError {
    pub fn code(&self) -> &'static str {
        match self {
            UserError::InvalidId(_) => codes::user::INVALID_USER_ID,
            UserError::NameTooLong { .. } => codes::user::INVALID_USER_NAME,
            UserError::InvalidEmail => codes::user::INVALID_USER_EMAIL,
            UserError::Certificate { source, .. } => source.code(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            UserError::Certificate { source, .. } => source.class(),
            _ => ErrorClass::Validation,
        }
    }
}

pub type UserResult<T> = Result<T, UserError>;

/// Failures while building a [`crate::ValidationPolicy`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("Chain verification is enabled but the trust store has no anchors")]
    EmptyTrustStore,

    #[error("Failed to load trust bundle: {0}")]
    TrustBundle(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        codes::system::CONFIGURATION
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
