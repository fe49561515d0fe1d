use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::handlers::{certificates::wire_record, DeletedResponse};
use crate::server::CertStoreServer;
use crate::validation::{user_id_from_path, RequestValidation};
use crate::{validate_field, validate_required};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use certificate_engine::user::{validate_email, validate_name};
use certificate_engine::{CertificateData, CertificateId, User, UserCertificates};
use database_layer::{CertificateFilter, UserChanges, UserRecord};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

/// Request to create a user together with its certificates
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Must be empty, the server assigns the ID
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Certificates to validate and store with the user
    #[serde(default)]
    pub certs: Vec<CertificateData>,
}

impl RequestValidation for CreateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(
            self.id,
            self.id.is_empty(),
            "No user ID may be specified when creating a user"
        );
        validate_required!(self.name, "name is required");
        validate_required!(self.email, "email is required");
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Partial update of a user; empty fields keep the stored value
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub certs: UserCertificates,
}

impl RequestValidation for UpdateUserRequest {
    fn validate(&self) -> Result<(), ApiError> {
        validate_field!(
            self.id,
            self.id.is_empty(),
            "The user ID may not be updated in a PATCH request"
        );
        validate_field!(
            self.certs,
            self.certs.is_empty(),
            "The user certificates may not be updated in a PATCH request"
        );
        if !self.name.is_empty() {
            validate_name(&self.name)?;
        }
        if !self.email.is_empty() {
            validate_email(&self.email)?;
        }
        Ok(())
    }
}

impl UpdateUserRequest {
    fn into_changes(self) -> UserChanges {
        UserChanges {
            name: Some(self.name).filter(|name| !name.is_empty()),
            email: Some(self.email).filter(|email| !email.is_empty()),
        }
    }
}

/// Query parameters for reading a user
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadUserQuery {
    /// Return full certificate records instead of IDs: all, active or inactive
    #[serde(rename = "show-certs")]
    pub show_certs: Option<String>,
}

fn compact_user(record: UserRecord) -> User {
    User {
        id: record.id.to_string(),
        name: record.name,
        email: record.email,
        certs: UserCertificates::Ids(
            record
                .certificate_ids
                .into_iter()
                .map(CertificateId::into_string)
                .collect(),
        ),
    }
}

async fn load_user(
    server: &CertStoreServer,
    user_id: u64,
    show_certs: Option<CertificateFilter>,
) -> ApiResult<User> {
    let record = server.users.read_user(user_id).await?;
    let Some(filter) = show_certs else {
        return Ok(compact_user(record));
    };

    let certs = server
        .certificates
        .list_for_user(user_id, filter)
        .await?
        .iter()
        .map(wire_record)
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(User {
        id: record.id.to_string(),
        name: record.name,
        email: record.email,
        certs: UserCertificates::Full(certs),
    })
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created with normalized certificates", body = User),
        (status = 400, description = "Invalid user or certificate", body = crate::error::ApiErrorResponse),
        (status = 409, description = "Duplicate certificate", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn create_user(
    State(server): State<CertStoreServer>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<User>>)> {
    let Json(request) = payload?;
    request.validate()?;

    let user = User {
        id: String::new(),
        name: request.name,
        email: request.email,
        certs: UserCertificates::Full(request.certs),
    };
    let records = user.certificates(&server.policy)?;
    let count = records.len();

    let user_id = server
        .users
        .create_user(user.name, user.email, records)
        .await?;
    info!(user_id, certs = count, "User created");

    let created = load_user(&server, user_id, Some(CertificateFilter::All)).await?;
    Ok((StatusCode::CREATED, Json(api_success(created))))
}

/// Read a user
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "users",
    params(
        ("user_id" = String, Path, description = "Positive integer user ID"),
        ReadUserQuery
    ),
    responses(
        (status = 200, description = "User with certificate IDs, or full certificates when show-certs is set", body = User),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn get_user(
    State(server): State<CertStoreServer>,
    Path(user_id): Path<String>,
    query: Result<Query<ReadUserQuery>, QueryRejection>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user_id = user_id_from_path(&user_id)?;
    let Query(query) = query?;

    let show_certs = query
        .show_certs
        .map(|value| value.parse::<CertificateFilter>())
        .transpose()
        .map_err(ApiError::validation)?;

    let user = load_user(&server, user_id, show_certs).await?;
    Ok(Json(api_success(user)))
}

/// Update a user's name or email
#[utoipa::path(
    patch,
    path = "/user/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "Positive integer user ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid update", body = crate::error::ApiErrorResponse),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn update_user(
    State(server): State<CertStoreServer>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user_id = user_id_from_path(&user_id)?;
    let Json(request) = payload?;
    request.validate()?;

    let record = server
        .users
        .update_user(user_id, request.into_changes())
        .await?;
    info!(user_id, "User updated");

    Ok(Json(api_success(compact_user(record))))
}

/// Delete a user and all of its certificates
#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "Positive integer user ID")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 404, description = "User not found", body = crate::error::ApiErrorResponse)
    )
)]
pub async fn delete_user(
    State(server): State<CertStoreServer>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ApiResponse<DeletedResponse>>> {
    let user_id = user_id_from_path(&user_id)?;
    server.users.delete_user(user_id).await?;
    info!(user_id, "User deleted");

    Ok(Json(api_success(DeletedResponse {
        id: user_id.to_string(),
    })))
}
