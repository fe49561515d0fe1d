//! Certificate validation pipeline for CertStore
//!
//! Turns an untrusted wire certificate-plus-key pair into a verified,
//! content-addressed record, and converts records back to the wire form.
//!
//! Ingest runs leaf-first:
//! - [`pem_codec`] repairs transport-escaped PEM
//! - [`certificate`] and [`keys`] decode the certificate and private key
//! - [`identity`] derives the SHA-256 certificate Id
//! - [`validator`] cross-checks the pair against a [`ValidationPolicy`]
//! - [`record`] assembles the [`Certificate`] record
//!
//! [`user`] cascades the same pipeline over a user's certificates.
//!
//! # Example
//!
//! ```rust,no_run
//! use certificate_engine::{Certificate, CertificateData, ValidationPolicy};
//!
//! fn ingest(data: &CertificateData) -> Result<CertificateData, certificate_engine::CertError> {
//!     let policy = ValidationPolicy::default();
//!     let cert = Certificate::from_data(data, &policy)?;
//!     cert.to_data()
//! }
//! ```

pub mod certificate;
pub mod config;
pub mod error;
pub mod identity;
pub mod keys;
pub mod pem_codec;
pub mod record;
pub mod trust;
pub mod user;
pub mod validator;

pub use certificate::{decode_certificate, ParsedCertificate, SubjectPublicKey};
pub use config::ValidationPolicy;
pub use error::*;
pub use identity::CertificateId;
pub use keys::{decode_private_key, EcPrivateKey, NamedCurve, PrivateKey};
pub use record::{Certificate, CertificateData};
pub use trust::TrustStore;
pub use user::{User, UserCertificates};
