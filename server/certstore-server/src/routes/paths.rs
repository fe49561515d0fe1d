//! Centralized API route path constants
//!
//! Runtime route definitions use these constants. utoipa `#[path(...)]`
//! attributes need string literals, so the paths there must match these
//! exactly (with `{param}` in place of `:param`).

/// Plain-text index
pub const INDEX: &str = "/";

/// Health check endpoints
pub mod health {
    pub const HEALTH: &str = "/health";
}

/// User endpoints
pub mod users {
    pub const USERS: &str = "/user";
    pub const USER_BY_ID: &str = "/user/:user_id";
}

/// Certificate endpoints, always scoped to a user
pub mod certificates {
    pub const CERTIFICATES: &str = "/user/:user_id/cert";
    pub const CERTIFICATE_BY_ID: &str = "/user/:user_id/cert/:cert_id";
}

/// API documentation
pub mod docs {
    pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
}
