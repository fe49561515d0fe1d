use axum::Json;
use utoipa::OpenApi;

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::index,
        crate::handlers::health::health_check,

        // User endpoints
        crate::handlers::users::create_user,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,

        // Certificate endpoints
        crate::handlers::certificates::create_certificate,
        crate::handlers::certificates::get_certificate,
        crate::handlers::certificates::update_certificate,
        crate::handlers::certificates::delete_certificate,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::certificates::UpdateCertificateRequest,
            crate::handlers::DeletedResponse,
            crate::error::ApiErrorResponse,
            certificate_engine::User,
            certificate_engine::UserCertificates,
            certificate_engine::CertificateData,
        )
    ),
    tags(
        (name = "health", description = "System health and API overview"),
        (name = "users", description = "Users and their certificate sets"),
        (name = "certificates", description = "Certificate and private key records"),
    ),
    info(
        title = "CertStore API",
        version = "0.1.0",
        description = "Stores X.509 certificates with their private keys. Every record is validated on ingest and addressed by the SHA-256 of its DER certificate.",
        contact(
            name = "RustCare Team",
            email = "team@rustcare.dev",
            url = "https://rustcare.dev"
        ),
        license(
            name = "AGPL-3.0-only",
            url = "https://github.com/Open-Hims-HQ/rustcare-engine/blob/main/LICENSE"
        ),
    ),
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
