use certificate_engine::CertificateId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stored user with the Ids of its certificates, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub certificate_ids: Vec<CertificateId>,
}

/// Partial update of a user's fields; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Which of a user's certificates to list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl CertificateFilter {
    pub fn matches(&self, active: bool) -> bool {
        match self {
            CertificateFilter::All => true,
            CertificateFilter::Active => active,
            CertificateFilter::Inactive => !active,
        }
    }
}

impl FromStr for CertificateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CertificateFilter::All),
            "active" => Ok(CertificateFilter::Active),
            "inactive" => Ok(CertificateFilter::Inactive),
            other => Err(format!(
                "Unknown certificate filter: {}. Valid options: all, active, inactive",
                other
            )),
        }
    }
}

impl fmt::Display for CertificateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateFilter::All => f.write_str("all"),
            CertificateFilter::Active => f.write_str("active"),
            CertificateFilter::Inactive => f.write_str("inactive"),
        }
    }
}
