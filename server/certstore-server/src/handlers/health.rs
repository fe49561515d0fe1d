use crate::error::{api_success, ApiError, ApiResponse};
use crate::server::CertStoreServer;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// System uptime in seconds
    #[schema(example = 3600)]
    pub uptime: u64,
    /// Whether certificate chains are verified on ingest
    pub verify_chain: bool,
}

/// Plain-text index
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "API overview", body = String, content_type = "text/plain")
    )
)]
pub async fn index(State(server): State<CertStoreServer>) -> String {
    format!(
        "{} {}\n\n\
         POST   /user                          create a user with certificates\n\
         GET    /user/:user_id                 read a user (?show-certs=all|active|inactive)\n\
         PATCH  /user/:user_id                 update name or email\n\
         DELETE /user/:user_id                 delete a user and its certificates\n\
         POST   /user/:user_id/cert            add a certificate\n\
         GET    /user/:user_id/cert/:cert_id   read a certificate\n\
         PATCH  /user/:user_id/cert/:cert_id   set the active flag\n\
         DELETE /user/:user_id/cert/:cert_id   delete a certificate\n",
        server.config.name,
        env!("CARGO_PKG_VERSION"),
    )
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<CertStoreServer>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime(),
        verify_chain: server.policy.verify_chain,
    };

    Ok(Json(api_success(response)))
}
