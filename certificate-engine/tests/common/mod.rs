//! Shared fixtures: certificates and keys generated at test time

#![allow(dead_code)]

use certificate_engine::pem_codec;
use certificate_engine::CertificateData;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use pkcs8::{AssociatedOid, DecodePrivateKey, EncodePrivateKey};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::RsaPrivateKey;
use sec1::der::Encode;
use std::sync::OnceLock;

/// A generated certificate and its private key
pub struct Fixture {
    pub cert: rcgen::Certificate,
    pub key_pair: KeyPair,
    /// Canonical PEM of the private key as it should be submitted
    pub key_pem: String,
}

impl Fixture {
    pub fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }

    pub fn cert_pem(&self) -> String {
        pem_codec::encode_block("CERTIFICATE", self.cert.der())
    }

    /// Wire record with transport-escaped fields and no Id
    pub fn wire(&self) -> CertificateData {
        CertificateData {
            id: String::new(),
            user_id: "1".to_string(),
            active: true,
            cert: pem_codec::escape(&self.cert_pem()),
            key: pem_codec::escape(&self.key_pem),
        }
    }

    /// Same certificate, but carrying another fixture's key
    pub fn wire_with_key_of(&self, other: &Fixture) -> CertificateData {
        CertificateData {
            key: pem_codec::escape(&other.key_pem),
            ..self.wire()
        }
    }
}

fn rsa_2048() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("Failed to generate RSA key")
    })
}

fn params(common_name: &str) -> CertificateParams {
    let mut params = CertificateParams::new(vec![format!("{}.example.com", common_name)])
        .expect("Failed to build certificate params");
    params.distinguished_name.push(DnType::CommonName, common_name);
    params
}

fn ca_params(common_name: &str) -> CertificateParams {
    let mut params = params(common_name);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params
}

/// Self-signed 2048-bit RSA certificate, key as PKCS#8 ("PRIVATE KEY")
pub fn rsa_self_signed() -> Fixture {
    let pkcs8 = rsa_2048().to_pkcs8_der().expect("Failed to encode RSA key");
    let key_pem = pem_codec::encode_block("PRIVATE KEY", pkcs8.as_bytes());
    let key_pair = KeyPair::from_pkcs8_pem_and_sign_algo(&key_pem, &rcgen::PKCS_RSA_SHA256)
        .expect("Failed to load RSA key pair");
    let cert = params("rsa-leaf").self_signed(&key_pair).expect("Failed to self-sign");

    Fixture { cert, key_pair, key_pem }
}

/// Same RSA certificate, key as PKCS#1 ("RSA PRIVATE KEY")
pub fn rsa_self_signed_pkcs1() -> Fixture {
    let mut fixture = rsa_self_signed();
    let pkcs1 = rsa_2048().to_pkcs1_der().expect("Failed to encode RSA key");
    fixture.key_pem = pem_codec::encode_block("RSA PRIVATE KEY", pkcs1.as_bytes());
    fixture
}

/// Self-signed EC certificate, key as PKCS#8 ("PRIVATE KEY")
pub fn ec_self_signed(alg: &'static rcgen::SignatureAlgorithm, common_name: &str) -> Fixture {
    let key_pair = KeyPair::generate_for(alg).expect("Failed to generate EC key");
    let cert = params(common_name).self_signed(&key_pair).expect("Failed to self-sign");
    let key_pem = key_pair.serialize_pem();

    Fixture { cert, key_pair, key_pem }
}

pub fn p256_self_signed() -> Fixture {
    ec_self_signed(&rcgen::PKCS_ECDSA_P256_SHA256, "p256-leaf")
}

/// P-256 certificate with its key re-encoded as SEC1 ("EC PRIVATE KEY"),
/// named curve and public point included as OpenSSL writes them
pub fn p256_self_signed_sec1() -> Fixture {
    let mut fixture = p256_self_signed();
    let secret = p256::SecretKey::from_pkcs8_der(&fixture.key_pair.serialize_der())
        .expect("Failed to decode P-256 key");
    let point = secret.public_key().to_encoded_point(false);
    let sec1 = sec1::EcPrivateKey {
        private_key: &secret.to_bytes(),
        parameters: Some(sec1::EcParameters::NamedCurve(p256::NistP256::OID)),
        public_key: Some(point.as_bytes()),
    }
    .to_der()
    .expect("Failed to encode SEC1 key");
    fixture.key_pem = pem_codec::encode_block("EC PRIVATE KEY", &sec1);
    fixture
}

pub fn p384_self_signed() -> Fixture {
    ec_self_signed(&rcgen::PKCS_ECDSA_P384_SHA384, "p384-leaf")
}

/// A CA and a leaf it issued
pub struct Chain {
    pub root: Fixture,
    pub intermediate: Option<Fixture>,
    pub leaf: Fixture,
}

impl Chain {
    /// PEM bundle holding the root and any intermediate
    pub fn bundle(&self) -> String {
        let mut bundle = self.root.cert_pem();
        if let Some(intermediate) = &self.intermediate {
            bundle.push_str(&intermediate.cert_pem());
        }
        bundle
    }
}

fn issue(common_name: &str, ca: bool, issuer: &Fixture) -> Fixture {
    let key_pair =
        KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).expect("Failed to generate EC key");
    let params = if ca { ca_params(common_name) } else { params(common_name) };
    let cert = params
        .signed_by(&key_pair, &issuer.cert, &issuer.key_pair)
        .expect("Failed to sign certificate");
    let key_pem = key_pair.serialize_pem();

    Fixture { cert, key_pair, key_pem }
}

fn root(common_name: &str) -> Fixture {
    let key_pair =
        KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).expect("Failed to generate EC key");
    let cert = ca_params(common_name)
        .self_signed(&key_pair)
        .expect("Failed to self-sign CA");
    let key_pem = key_pair.serialize_pem();

    Fixture { cert, key_pair, key_pem }
}

/// Root CA directly issuing a leaf
pub fn direct_chain() -> Chain {
    let root = root("Test Root CA");
    let leaf = issue("leaf", false, &root);
    Chain { root, intermediate: None, leaf }
}

/// Root CA, intermediate, leaf. `intermediate_is_ca` controls basic constraints.
pub fn intermediate_chain(intermediate_is_ca: bool) -> Chain {
    let root = root("Test Root CA");
    let intermediate = issue("Test Intermediate", intermediate_is_ca, &root);
    let leaf = issue("leaf", false, &intermediate);
    Chain { root, intermediate: Some(intermediate), leaf }
}
