//! User aggregate validation
//!
//! A user is checked field by field, then every attached certificate is
//! pushed through the wire codec in order. The first failure aborts and
//! leaves the user untouched.

use crate::config::ValidationPolicy;
use crate::error::{UserError, UserResult};
use crate::record::{Certificate, CertificateData};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Longest accepted name, in Unicode code points
pub const MAX_NAME_CHARS: usize = 746;

lazy_static! {
    static ref EMAIL_REGEX: Regex = build_email_regex();
}

fn build_email_regex() -> Regex {
    let ucs = r"\x{00A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}";
    let atext = format!(r"[a-zA-Z0-9!#$%&'*+\-/=?^_`{{|}}~{ucs}]");
    let dot_atom = format!(r"{atext}+(\.{atext}+)*");

    let fws = r"(([\x20\x09]*\x0d\x0a)?[\x20\x09]+)";
    let qtext = format!(r"[\x01-\x08\x0b\x0c\x0e-\x1f\x7f\x21\x23-\x5b\x5d-\x7e{ucs}]");
    let quoted_pair = format!(r"\\[\x01-\x09\x0b\x0c\x0d-\x7f{ucs}]");
    let quoted = format!(r"\x22({fws}?({qtext}|{quoted_pair}))*{fws}?\x22");

    let label = format!(
        r"([a-zA-Z0-9{ucs}]|[a-zA-Z0-9{ucs}][a-zA-Z0-9\-._~{ucs}]*[a-zA-Z0-9{ucs}])"
    );
    let tld = format!(r"([a-zA-Z{ucs}]|[a-zA-Z{ucs}][a-zA-Z0-9\-._~{ucs}]*[a-zA-Z{ucs}])");

    let pattern = format!(r"^({dot_atom}|{quoted})@({label}\.)+{tld}\.?$");
    Regex::new(&pattern).unwrap()
}

/// Certificates attached to a user: full wire records or bare Ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserCertificates {
    Full(Vec<CertificateData>),
    Ids(Vec<String>),
}

impl Default for UserCertificates {
    fn default() -> Self {
        UserCertificates::Full(Vec::new())
    }
}

impl UserCertificates {
    pub fn is_empty(&self) -> bool {
        match self {
            UserCertificates::Full(certs) => certs.is_empty(),
            UserCertificates::Ids(ids) => ids.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            UserCertificates::Full(certs) => certs.len(),
            UserCertificates::Ids(ids) => ids.len(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub certs: UserCertificates,
}

impl User {
    /// Validate every field and normalize attached certificates in place.
    pub fn validate_normalize(&mut self, policy: &ValidationPolicy) -> UserResult<()> {
        if !self.id.is_empty() {
            parse_user_id(&self.id)?;
        }
        validate_name(&self.name)?;
        validate_email(&self.email)?;

        if let UserCertificates::Full(certs) = &self.certs {
            let normalized = normalize_all(certs, policy)?;
            self.certs = UserCertificates::Full(normalized);
        }

        debug!(user_id = %self.id, certs = self.certs.len(), "User validated");
        Ok(())
    }

    /// Decode every attached certificate into a record, all or nothing.
    ///
    /// A compact user (Ids only) has nothing to decode.
    pub fn certificates(&self, policy: &ValidationPolicy) -> UserResult<Vec<Certificate>> {
        match &self.certs {
            UserCertificates::Full(certs) => certs
                .iter()
                .enumerate()
                .map(|(index, data)| {
                    Certificate::from_data(data, policy)
                        .map_err(|source| UserError::Certificate { index, source })
                })
                .collect(),
            UserCertificates::Ids(_) => Ok(Vec::new()),
        }
    }
}

fn normalize_all(
    certs: &[CertificateData],
    policy: &ValidationPolicy,
) -> UserResult<Vec<CertificateData>> {
    certs
        .iter()
        .enumerate()
        .map(|(index, data)| {
            Certificate::from_data(data, policy)
                .and_then(|cert| cert.to_data())
                .map_err(|source| {
                    warn!(index, error = %source, "Rejected user certificate");
                    UserError::Certificate { index, source }
                })
        })
        .collect()
}

/// Parse a user Id: a positive decimal integer.
pub fn parse_user_id(id: &str) -> UserResult<u64> {
    match id.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value.unsigned_abs()),
        _ => Err(UserError::InvalidId(id.to_string())),
    }
}

pub fn validate_name(name: &str) -> UserResult<()> {
    let length = name.chars().count();
    if length > MAX_NAME_CHARS {
        return Err(UserError::NameTooLong {
            length,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}

pub fn validate_email(email: &str) -> UserResult<()> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(UserError::InvalidEmail)
    }
}
