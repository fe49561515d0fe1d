//! X.509 certificate decoding

use crate::error::{CertError, CertResult, PemField};
use crate::keys::NamedCurve;
use crate::pem_codec;
use chrono::{DateTime, Utc};
use tracing::debug;
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

pub const CERTIFICATE_TAG: &str = "CERTIFICATE";

/// Public key declared by a certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectPublicKey {
    Rsa {
        /// Big-endian modulus, leading zero bytes stripped
        modulus: Vec<u8>,
        exponent: Vec<u8>,
    },
    Ec {
        /// `None` when the curve is not one of the supported named curves
        curve: Option<NamedCurve>,
        curve_oid: Option<String>,
        /// SEC1-encoded point
        point: Vec<u8>,
    },
    Other {
        algorithm_oid: String,
    },
}

impl SubjectPublicKey {
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            SubjectPublicKey::Rsa { .. } => "RSA",
            SubjectPublicKey::Ec { .. } => "EC",
            SubjectPublicKey::Other { .. } => "other",
        }
    }
}

/// A decoded certificate. Owns its DER so it can be re-parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    der: Vec<u8>,
    pub subject: String,
    pub issuer: String,
    /// Lowercase hex
    pub serial: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub public_key: SubjectPublicKey,
}

impl ParsedCertificate {
    /// Parse DER bytes
    pub fn from_der(der: &[u8]) -> CertResult<Self> {
        let (rest, cert) = X509Certificate::from_der(der)
            .map_err(|e| CertError::malformed(PemField::Certificate, e))?;
        if !rest.is_empty() {
            return Err(CertError::malformed(
                PemField::Certificate,
                format!("{} trailing bytes after certificate", rest.len()),
            ));
        }

        let validity = cert.validity();
        let not_before = timestamp(validity.not_before.timestamp())?;
        let not_after = timestamp(validity.not_after.timestamp())?;

        Ok(Self {
            der: der.to_vec(),
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: hex::encode(cert.raw_serial()),
            not_before,
            not_after,
            public_key: subject_public_key(cert.public_key())?,
        })
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Canonical PEM with LF line endings
    pub fn to_pem(&self) -> String {
        pem_codec::encode_block(CERTIFICATE_TAG, &self.der)
    }
}

/// Decode canonical PEM bytes holding exactly one `CERTIFICATE` block.
pub fn decode_certificate(pem_bytes: &[u8]) -> CertResult<ParsedCertificate> {
    let block = ::pem::parse(pem_bytes).map_err(|e| CertError::InvalidCertificatePem {
        reason: format!("no PEM block found: {}", e),
    })?;

    if block.tag() != CERTIFICATE_TAG {
        return Err(CertError::InvalidCertificatePem {
            reason: format!("expected a CERTIFICATE block, found \"{}\"", block.tag()),
        });
    }

    let parsed = ParsedCertificate::from_der(block.contents())?;
    debug!(
        subject = %parsed.subject,
        serial = %parsed.serial,
        algorithm = parsed.public_key.algorithm_name(),
        "Decoded certificate"
    );
    Ok(parsed)
}

fn subject_public_key(spki: &SubjectPublicKeyInfo<'_>) -> CertResult<SubjectPublicKey> {
    let parsed = spki
        .parsed()
        .map_err(|e| CertError::malformed(PemField::Certificate, e))?;

    let key = match parsed {
        PublicKey::RSA(rsa) => SubjectPublicKey::Rsa {
            modulus: strip_leading_zeros(rsa.modulus).to_vec(),
            exponent: strip_leading_zeros(rsa.exponent).to_vec(),
        },
        PublicKey::EC(point) => {
            let curve_oid = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|params| params.as_oid().ok())
                .map(|oid| oid.to_id_string());
            SubjectPublicKey::Ec {
                curve: curve_oid.as_deref().and_then(NamedCurve::from_oid),
                curve_oid,
                point: point.data().to_vec(),
            }
        }
        _ => SubjectPublicKey::Other {
            algorithm_oid: spki.algorithm.algorithm.to_id_string(),
        },
    };

    Ok(key)
}

pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    bytes.get(start..).unwrap_or_default()
}

fn timestamp(secs: i64) -> CertResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| CertError::malformed(PemField::Certificate, "validity time out of range"))
}
