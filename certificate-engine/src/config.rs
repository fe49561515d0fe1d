//! Validation policy
//!
//! The policy is fixed when the process starts and then shared read-only
//! (`Arc<ValidationPolicy>`) by every validation call:
//! - Optional chain verification against a configured trust store
//! - Minimum RSA modulus size
//! - Minimum EC strength (curve-order bits)

use crate::error::{ConfigError, ConfigResult};
use crate::trust::TrustStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Default minimum RSA modulus size in bits
pub const DEFAULT_MIN_RSA_BITS: usize = 1024;

/// Default minimum EC strength in bits
pub const DEFAULT_MIN_EC_BITS: usize = 160;

/// RSA size below which a warning is logged at startup
pub const RECOMMENDED_MIN_RSA_BITS: usize = 2048;

/// EC strength below which a warning is logged at startup
pub const RECOMMENDED_MIN_EC_BITS: usize = 224;

/// Immutable settings consulted by the consistency validator
#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    /// Verify the certificate chain against `trust_store` (off by default)
    pub verify_chain: bool,

    /// Minimum RSA modulus bit length
    pub min_rsa_bits: usize,

    /// Minimum EC curve-order bit length
    pub min_ec_bits: usize,

    /// Anchors and intermediates used when `verify_chain` is on
    pub trust_store: Arc<TrustStore>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            verify_chain: false,
            min_rsa_bits: DEFAULT_MIN_RSA_BITS,
            min_ec_bits: DEFAULT_MIN_EC_BITS,
            trust_store: Arc::new(TrustStore::empty()),
        }
    }
}

impl ValidationPolicy {
    /// Build the policy from `CERTSTORE_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        let mut policy = Self::default();

        if let Ok(value) = std::env::var("CERTSTORE_VERIFY_CHAIN") {
            policy.verify_chain = parse_flag("CERTSTORE_VERIFY_CHAIN", &value)?;
        }

        if let Ok(value) = std::env::var("CERTSTORE_MIN_RSA_BITS") {
            policy.min_rsa_bits = value.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: "CERTSTORE_MIN_RSA_BITS",
                reason: format!("{}", e),
            })?;
        }

        if let Ok(value) = std::env::var("CERTSTORE_MIN_EC_BITS") {
            policy.min_ec_bits = value.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: "CERTSTORE_MIN_EC_BITS",
                reason: format!("{}", e),
            })?;
        }

        if let Ok(path) = std::env::var("CERTSTORE_TRUST_BUNDLE") {
            let path = Path::new(&path);
            let store = TrustStore::from_pem_file(path)?;
            info!(
                path = %path.display(),
                anchors = store.anchor_count(),
                intermediates = store.intermediate_count(),
                "Loaded trust bundle"
            );
            policy.trust_store = Arc::new(store);
        }

        policy.validate()?;

        Ok(policy)
    }

    /// Validate the policy
    pub fn validate(&self) -> ConfigResult<()> {
        if self.verify_chain && self.trust_store.anchor_count() == 0 {
            return Err(ConfigError::EmptyTrustStore);
        }

        if self.min_rsa_bits == 0 {
            return Err(ConfigError::InvalidValue {
                name: "CERTSTORE_MIN_RSA_BITS",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.min_ec_bits == 0 {
            return Err(ConfigError::InvalidValue {
                name: "CERTSTORE_MIN_EC_BITS",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.min_rsa_bits < RECOMMENDED_MIN_RSA_BITS {
            warn!(
                min_rsa_bits = self.min_rsa_bits,
                recommended = RECOMMENDED_MIN_RSA_BITS,
                "Minimum RSA key size is below the recommended floor"
            );
        }

        if self.min_ec_bits < RECOMMENDED_MIN_EC_BITS {
            warn!(
                min_ec_bits = self.min_ec_bits,
                recommended = RECOMMENDED_MIN_EC_BITS,
                "Minimum EC key strength is below the recommended floor"
            );
        }

        Ok(())
    }

    pub fn with_chain_verification(mut self, trust_store: TrustStore) -> Self {
        self.verify_chain = true;
        self.trust_store = Arc::new(trust_store);
        self
    }

    pub fn with_min_rsa_bits(mut self, bits: usize) -> Self {
        self.min_rsa_bits = bits;
        self
    }

    pub fn with_min_ec_bits(mut self, bits: usize) -> Self {
        self.min_ec_bits = bits;
        self
    }
}

fn parse_flag(name: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected a boolean, got `{}`", other),
        }),
    }
}
