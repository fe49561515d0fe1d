// Error codes implementation
// Stable, client-facing codes for every error the CertStore API can return.
// Codes never change once published; add new ones at the end of a block.

pub mod certificate {
    pub const INVALID_PEM_BLOCK: &str = "CERT_1001";
    pub const INVALID_CERTIFICATE_PEM: &str = "CERT_1002";
    pub const MISSING_PRIVATE_KEY: &str = "CERT_1003";
    pub const DSA_NOT_SUPPORTED: &str = "CERT_1004";
    pub const INVALID_PRIVATE_KEY: &str = "CERT_1005";
    pub const INVALID_CERTIFICATE_ID: &str = "CERT_1006";
    pub const KEY_TOO_SMALL: &str = "CERT_1007";
    pub const VERIFICATION_FAILED: &str = "CERT_1008";
    pub const MALFORMED_ENCODING: &str = "CERT_1009";
}

pub mod user {
    pub const INVALID_USER_ID: &str = "USER_2001";
    pub const INVALID_USER_NAME: &str = "USER_2002";
    pub const INVALID_USER_EMAIL: &str = "USER_2003";
}

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_3001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_3002";
}

pub mod storage {
    pub const NOT_FOUND: &str = "STORE_4001";
    pub const CONFLICT: &str = "STORE_4002";
    pub const INTERNAL: &str = "STORE_4003";
}

pub mod system {
    pub const INTERNAL_ERROR: &str = "SYS_5001";
    pub const CONFIGURATION: &str = "SYS_5002";
}
