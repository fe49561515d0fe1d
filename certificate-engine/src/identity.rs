//! Content-addressed certificate identifiers

use crate::error::{CertError, CertResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA-256 digest
pub const CERTIFICATE_ID_LEN: usize = 64;

/// Lowercase hex SHA-256 of a certificate's DER encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(String);

impl CertificateId {
    /// Hash the DER bytes
    pub fn derive(der: &[u8]) -> Self {
        CertificateId(hex::encode(Sha256::digest(der)))
    }

    /// Resolve a possibly-empty supplied Id against the certificate.
    ///
    /// The Id is always recomputed; a supplied value must match it exactly.
    pub fn resolve(supplied: &str, der: &[u8]) -> CertResult<Self> {
        let expected = Self::derive(der);
        if supplied.is_empty() || supplied == expected.0 {
            return Ok(expected);
        }
        Err(CertError::InvalidCertificateId {
            expected: expected.0,
            supplied: supplied.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Shape check used for path parameters, no hashing involved
    pub fn is_well_formed(candidate: &str) -> bool {
        candidate.len() == CERTIFICATE_ID_LEN
            && candidate.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CertificateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
