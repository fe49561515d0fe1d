//! Certificate records and their wire form
//!
//! `Certificate::from_data` is the only way to build a record: it normalizes,
//! decodes and validates the wire fields and either returns a complete
//! record or a single error. `Certificate::to_data` is the inverse.

use crate::certificate::{decode_certificate, ParsedCertificate};
use crate::config::ValidationPolicy;
use crate::error::{CertResult, PemField};
use crate::identity::CertificateId;
use crate::keys::{decode_private_key, PrivateKey};
use crate::pem_codec;
use crate::validator;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// Wire representation of a certificate record.
///
/// `cert` and `key` carry transport-escaped PEM (body newlines as spaces).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CertificateData {
    #[serde(default)]
    pub id: String,

    #[serde(default, rename = "user", alias = "userId")]
    pub user_id: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub cert: String,

    #[serde(default)]
    pub key: String,
}

/// A validated certificate/private-key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    id: CertificateId,
    user_id: String,
    active: bool,
    cert: ParsedCertificate,
    private_key: PrivateKey,
}

impl Certificate {
    /// Decode and validate a wire record.
    pub fn from_data(data: &CertificateData, policy: &ValidationPolicy) -> CertResult<Self> {
        let cert_pem = pem_codec::normalize(&data.cert, PemField::Certificate)?;
        let key_pem = pem_codec::normalize(&data.key, PemField::PrivateKey)?;

        let cert = decode_certificate(&cert_pem)?;
        let private_key = decode_private_key(&key_pem)?;

        let id = validator::verify(&cert, &private_key, &data.id, policy)?;

        debug!(id = %id, user_id = %data.user_id, subject = %cert.subject, "Certificate validated");

        Ok(Self {
            id,
            user_id: data.user_id.clone(),
            active: data.active,
            cert,
            private_key,
        })
    }

    /// Re-encode to the wire form
    pub fn to_data(&self) -> CertResult<CertificateData> {
        let key_der = self.private_key.to_der()?;

        Ok(CertificateData {
            id: self.id.to_string(),
            user_id: self.user_id.clone(),
            active: self.active,
            cert: pem_codec::escape(&self.cert.to_pem()),
            key: pem_codec::encode_wire(self.private_key.pem_tag(), &key_der),
        })
    }

    pub fn id(&self) -> &CertificateId {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Toggle the active flag; cryptographic fields never change.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Reassign the owning user. Used when attaching to a freshly created user.
    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
    }

    pub fn certificate(&self) -> &ParsedCertificate {
        &self.cert
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}
