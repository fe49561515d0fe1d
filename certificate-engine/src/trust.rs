//! Trust store and certificate chain verification
//!
//! A bundle of PEM certificates is split into anchors (self-issued) and
//! intermediates. Verification walks from the leaf up to an anchor:
//! - every certificate in the path must be inside its validity window
//! - every issuer's subject must equal the child's issuer name
//! - every signature must verify under the issuer's public key
//! - intermediates must be CA certificates

use crate::certificate::{ParsedCertificate, CERTIFICATE_TAG};
use crate::error::{CertError, CertResult, ConfigError, ConfigResult};
use std::path::Path;
use tracing::{debug, warn};
use x509_parser::prelude::*;

/// Maximum number of issuers followed above the leaf
pub const MAX_CHAIN_DEPTH: usize = 8;

#[derive(Clone, Default)]
pub struct TrustStore {
    anchors: Vec<Vec<u8>>,
    intermediates: Vec<Vec<u8>>,
}

impl std::fmt::Debug for TrustStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustStore")
            .field("anchors", &self.anchors.len())
            .field("intermediates", &self.intermediates.len())
            .finish()
    }
}

impl TrustStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every `CERTIFICATE` block of a PEM bundle
    pub fn from_pem_bundle(bundle: &[u8]) -> ConfigResult<Self> {
        let blocks = ::pem::parse_many(bundle).map_err(|e| ConfigError::TrustBundle(e.to_string()))?;

        let mut store = Self::empty();
        for block in blocks {
            if block.tag() != CERTIFICATE_TAG {
                return Err(ConfigError::TrustBundle(format!(
                    "unexpected PEM block \"{}\" in trust bundle",
                    block.tag()
                )));
            }
            store.add_der(block.contents().to_vec())?;
        }

        Ok(store)
    }

    pub fn from_pem_file(path: &Path) -> ConfigResult<Self> {
        let bundle = std::fs::read(path)?;
        Self::from_pem_bundle(&bundle)
    }

    /// Add one DER certificate, classifying it as anchor or intermediate
    pub fn add_der(&mut self, der: Vec<u8>) -> ConfigResult<()> {
        let self_issued = {
            let (_, cert) = X509Certificate::from_der(&der)
                .map_err(|e| ConfigError::TrustBundle(format!("invalid certificate: {}", e)))?;
            cert.subject().as_raw() == cert.issuer().as_raw()
        };

        if self_issued {
            self.anchors.push(der);
        } else {
            self.intermediates.push(der);
        }
        Ok(())
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    pub fn intermediate_count(&self) -> usize {
        self.intermediates.len()
    }

    /// Verify that `leaf` chains up to one of the anchors
    pub fn verify(&self, leaf: &ParsedCertificate) -> CertResult<()> {
        let mut current: &[u8] = leaf.der();

        for depth in 0..=MAX_CHAIN_DEPTH {
            let cert = parse(current)?;
            check_validity(&cert)?;

            if depth > 0 && !is_ca(&cert) {
                return Err(failed(format!(
                    "intermediate \"{}\" is not a CA certificate",
                    cert.subject()
                )));
            }

            if self.anchors.iter().any(|anchor| anchor.as_slice() == current) {
                debug!(depth, subject = %cert.subject(), "Certificate is a trust anchor");
                return Ok(());
            }

            if let Some(anchor) = find_issuer(&cert, &self.anchors)? {
                check_validity(&anchor)?;
                debug!(depth, anchor = %anchor.subject(), "Certificate chain verified");
                return Ok(());
            }

            match self.intermediates.iter().find(|der| issued(&cert, der)) {
                Some(next) => current = next.as_slice(),
                None => {
                    warn!(subject = %cert.subject(), issuer = %cert.issuer(), "No trusted issuer found");
                    return Err(failed(format!(
                        "no trusted issuer found for \"{}\"",
                        cert.issuer()
                    )));
                }
            }
        }

        Err(failed(format!(
            "certificate chain is longer than {} certificates",
            MAX_CHAIN_DEPTH
        )))
    }
}

fn find_issuer<'a>(
    child: &X509Certificate<'_>,
    candidates: &'a [Vec<u8>],
) -> CertResult<Option<X509Certificate<'a>>> {
    match candidates.iter().find(|der| issued(child, der)) {
        Some(der) => parse(der).map(Some),
        None => Ok(None),
    }
}

fn parse(der: &[u8]) -> CertResult<X509Certificate<'_>> {
    X509Certificate::from_der(der)
        .map(|(_, cert)| cert)
        .map_err(|e| failed(format!("unparseable certificate in chain: {}", e)))
}

/// `issuer_der` carries the child's issuer name and signed it
fn issued(child: &X509Certificate<'_>, issuer_der: &[u8]) -> bool {
    match X509Certificate::from_der(issuer_der) {
        Ok((_, issuer)) => {
            issuer.subject().as_raw() == child.issuer().as_raw()
                && child.verify_signature(Some(issuer.public_key())).is_ok()
        }
        Err(_) => false,
    }
}

fn check_validity(cert: &X509Certificate<'_>) -> CertResult<()> {
    if cert.validity().is_valid() {
        Ok(())
    } else {
        Err(failed(format!(
            "certificate \"{}\" is outside its validity window",
            cert.subject()
        )))
    }
}

fn is_ca(cert: &X509Certificate<'_>) -> bool {
    matches!(cert.basic_constraints(), Ok(Some(bc)) if bc.value.ca)
}

fn failed(reason: String) -> CertError {
    CertError::VerificationFailed { reason }
}
