use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use certificate_engine::{CertError, UserError};
use database_layer::DatabaseError;
use error_common::{codes, ErrorClass};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Always false
    pub success: bool,
    /// Unique error ID for tracking
    pub error_id: String,
    /// Error class
    #[schema(example = "validation_error")]
    pub error_type: String,
    /// Stable error code
    #[schema(example = "CERT_1007")]
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when error occurred
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Comprehensive API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed a field check
    #[error("Validation error: {message}")]
    Validation { message: String, code: &'static str },

    /// The body or query string could not be decoded. `status` is 400
    /// unless the extractor reported something more specific (413, 415).
    #[error("Bad request: {message}")]
    BadRequest { message: String, status: StatusCode },

    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    /// Rejected by the certificate pipeline
    #[error(transparent)]
    Certificate(#[from] CertError),

    /// Rejected by user validation
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a simple validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::INVALID_INPUT,
        }
    }

    /// Create a validation error for an absent required field
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: codes::validation::MISSING_REQUIRED_FIELD,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Transport-independent class of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest { .. } => ErrorClass::Validation,
            ApiError::NotFound { .. } => ErrorClass::NotFound,
            ApiError::Certificate(err) => err.class(),
            ApiError::User(err) => err.class(),
            ApiError::Database(err) => err.class(),
            ApiError::Internal { .. } => ErrorClass::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { status, .. } => *status,
            _ => status_for(self.class()),
        }
    }

    /// Get the error type string for this error
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "bad_request",
            _ => self.class().as_str(),
        }
    }

    /// Stable client-facing error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. } => *code,
            ApiError::BadRequest { .. } => codes::validation::INVALID_INPUT,
            ApiError::NotFound { .. } => codes::storage::NOT_FOUND,
            ApiError::Certificate(err) => err.code(),
            ApiError::User(err) => err.code(),
            ApiError::Database(err) => err.code(),
            ApiError::Internal { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Message shown to the client; internal details stay in the logs
    fn public_message(&self) -> String {
        match self.class() {
            ErrorClass::Internal => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Map an error class to its HTTP status
pub fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::Validation => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        // Log the error with correlation ID
        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                error_type = %self.error_type(),
                status_code = %status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        } else {
            warn!(
                error_id = %error_id,
                error_type = %self.error_type(),
                code = %self.code(),
                status_code = %status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        }

        let error_response = ApiErrorResponse {
            success: false,
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            message: self.public_message(),
            timestamp: chrono::Utc::now(),
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE => rejection.status(),
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::BadRequest {
            message: rejection.body_text(),
            status,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
