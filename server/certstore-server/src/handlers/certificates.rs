use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::handlers::DeletedResponse;
use crate::server::CertStoreServer;
use crate::validation::{cert_id_from_path, user_id_from_path};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use certificate_engine::{Certificate, CertificateData};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

/// Request to change a certificate's active flag
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCertificateRequest {
    pub active: Option<bool>,
}

/// Encode a stored record for the wire.
///
/// Stored records were validated on the way in, so a failure here is ours.
pub(crate) fn wire_record(cert: &Certificate) -> ApiResult<CertificateData> {
    cert.to_data().map_err(|err| {
        ApiError::internal(format!("failed to encode stored certificate {}: {}", cert.id(), err))
    })
}

/// Validate and store a certificate for a user
#[utoipa::path(
    post,
    path = "/user/{user_id}/cert",
    tag = "certificates",
    params(("user_id" = String, Path, description = "Positive integer user ID")),
    request_body = CertificateData,
    responses(
        (status = 201, description = "Certificate stored in canonical form", body = CertificateData),
        (status = 400, description = "Certificate rejected", body = crate::error::ApiErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Certificate already stored for this user", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn create_certificate(
    State(server): State<CertStoreServer>,
    Path(user_id): Path<String>,
    payload: Result<Json<CertificateData>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CertificateData>>)> {
    let user_id = user_id_from_path(&user_id)?;
    let Json(data) = payload?;

    if !data.user_id.is_empty() && data.user_id != user_id.to_string() {
        return Err(ApiError::validation(format!(
            "The certificate names user {} but was posted to user {}",
            data.user_id, user_id
        )));
    }
    if !server.users.user_exists(user_id).await? {
        return Err(ApiError::not_found("User"));
    }

    let record = Certificate::from_data(&data, &server.policy)?;
    let cert_id = server.certificates.create(user_id, record).await?;
    info!(user_id, cert_id = %cert_id, "Certificate stored");

    let stored = server.certificates.read(user_id, cert_id.as_str()).await?;
    Ok((StatusCode::CREATED, Json(api_success(wire_record(&stored)?))))
}

/// Read a certificate
#[utoipa::path(
    get,
    path = "/user/{user_id}/cert/{cert_id}",
    tag = "certificates",
    params(
        ("user_id" = String, Path, description = "Positive integer user ID"),
        ("cert_id" = String, Path, description = "Hex SHA-256 of the DER certificate")
    ),
    responses(
        (status = 200, description = "Certificate record", body = CertificateData),
        (status = 404, description = "User or certificate not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn get_certificate(
    State(server): State<CertStoreServer>,
    Path((user_id, cert_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<CertificateData>>> {
    let user_id = user_id_from_path(&user_id)?;
    let cert_id = cert_id_from_path(&cert_id)?;

    let cert = server.certificates.read(user_id, cert_id).await?;
    debug!(user_id, cert_id, "Certificate read");
    Ok(Json(api_success(wire_record(&cert)?)))
}

/// Set a certificate's active flag
#[utoipa::path(
    patch,
    path = "/user/{user_id}/cert/{cert_id}",
    tag = "certificates",
    params(
        ("user_id" = String, Path, description = "Positive integer user ID"),
        ("cert_id" = String, Path, description = "Hex SHA-256 of the DER certificate")
    ),
    request_body = UpdateCertificateRequest,
    responses(
        (status = 200, description = "Updated certificate record", body = CertificateData),
        (status = 400, description = "Missing active flag", body = crate::error::ApiErrorResponse),
        (status = 404, description = "User or certificate not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn update_certificate(
    State(server): State<CertStoreServer>,
    Path((user_id, cert_id)): Path<(String, String)>,
    payload: Result<Json<UpdateCertificateRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<CertificateData>>> {
    let user_id = user_id_from_path(&user_id)?;
    let cert_id = cert_id_from_path(&cert_id)?;
    let Json(request) = payload?;
    let active = request
        .active
        .ok_or_else(|| ApiError::missing_field("active is required"))?;

    let cert = server
        .certificates
        .update_active(user_id, cert_id, active)
        .await?;
    info!(user_id, cert_id, active, "Certificate updated");

    Ok(Json(api_success(wire_record(&cert)?)))
}

/// Delete a certificate
#[utoipa::path(
    delete,
    path = "/user/{user_id}/cert/{cert_id}",
    tag = "certificates",
    params(
        ("user_id" = String, Path, description = "Positive integer user ID"),
        ("cert_id" = String, Path, description = "Hex SHA-256 of the DER certificate")
    ),
    responses(
        (status = 200, description = "Certificate deleted", body = DeletedResponse),
        (status = 404, description = "User or certificate not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn delete_certificate(
    State(server): State<CertStoreServer>,
    Path((user_id, cert_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    let user_id = user_id_from_path(&user_id)?;
    let cert_id = cert_id_from_path(&cert_id)?;

    server.certificates.delete(user_id, cert_id).await?;
    info!(user_id, cert_id, "Certificate deleted");

    Ok(Json(api_success(DeletedResponse {
        id: cert_id.to_string(),
    })))
}
