//! Consistency checks between a certificate and its private key
//!
//! Runs in a fixed order: chain verification (when enabled), identity,
//! key/certificate correspondence, then minimum key size.

use crate::certificate::{strip_leading_zeros, ParsedCertificate, SubjectPublicKey};
use crate::config::ValidationPolicy;
use crate::error::{CertError, CertResult, KeyAlgorithm, PemField};
use crate::identity::CertificateId;
use crate::keys::{EcPrivateKey, PrivateKey};
use rsa::traits::PublicKeyParts;
use tracing::warn;

/// Validate a decoded pair and return its resolved identity.
pub fn verify(
    cert: &ParsedCertificate,
    key: &PrivateKey,
    supplied_id: &str,
    policy: &ValidationPolicy,
) -> CertResult<CertificateId> {
    if policy.verify_chain {
        policy.trust_store.verify(cert)?;
    }

    let id = CertificateId::resolve(supplied_id, cert.der())?;

    check_correspondence(cert, key)?;
    check_key_size(key, policy)?;

    Ok(id)
}

/// The key's public half must equal the certificate's public key.
pub fn check_correspondence(cert: &ParsedCertificate, key: &PrivateKey) -> CertResult<()> {
    match (&cert.public_key, key) {
        (SubjectPublicKey::Rsa { modulus, .. }, PrivateKey::Rsa(private)) => {
            let key_modulus = private.n().to_bytes_be();
            if strip_leading_zeros(&key_modulus) == modulus.as_slice() {
                Ok(())
            } else {
                Err(CertError::invalid_key(
                    "private key does not match the certificate's RSA public key",
                ))
            }
        }
        (SubjectPublicKey::Ec { curve, point, .. }, PrivateKey::Ec(private)) => {
            if *curve != Some(private.curve()) {
                return Err(CertError::invalid_key(format!(
                    "private key is on curve {} but the certificate declares {}",
                    private.curve(),
                    curve.map(|c| c.to_string()).unwrap_or_else(|| "an unsupported curve".to_string())
                )));
            }
            if ec_point_matches(private, point)? {
                Ok(())
            } else {
                Err(CertError::invalid_key(
                    "private key does not match the certificate's EC public key",
                ))
            }
        }
        (declared, private) => Err(CertError::invalid_key(format!(
            "certificate declares a {} public key but the private key is {}",
            declared.algorithm_name(),
            private.algorithm()
        ))),
    }
}

fn ec_point_matches(private: &EcPrivateKey, point: &[u8]) -> CertResult<bool> {
    let matches = match private {
        EcPrivateKey::P224(secret) => p224::PublicKey::from_sec1_bytes(point)
            .map(|public| public == secret.public_key()),
        EcPrivateKey::P256(secret) => p256::PublicKey::from_sec1_bytes(point)
            .map(|public| public == secret.public_key()),
        EcPrivateKey::P384(secret) => p384::PublicKey::from_sec1_bytes(point)
            .map(|public| public == secret.public_key()),
        EcPrivateKey::P521(secret) => p521::PublicKey::from_sec1_bytes(point)
            .map(|public| public == secret.public_key()),
    };
    matches.map_err(|e| CertError::malformed(PemField::Certificate, e))
}

/// Enforce the policy's minimum key strength.
pub fn check_key_size(key: &PrivateKey, policy: &ValidationPolicy) -> CertResult<()> {
    let bits = key.strength_bits();
    let minimum = match key.algorithm() {
        KeyAlgorithm::Rsa => policy.min_rsa_bits,
        KeyAlgorithm::Ec => policy.min_ec_bits,
    };

    if bits < minimum {
        warn!(algorithm = %key.algorithm(), bits, minimum, "Rejected undersized key");
        return Err(CertError::KeyTooSmall {
            algorithm: key.algorithm(),
            bits,
            minimum,
        });
    }
    Ok(())
}
