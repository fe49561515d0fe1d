use error_common::{codes, ErrorClass};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl DatabaseError {
    pub fn user_not_found(id: u64) -> Self {
        DatabaseError::NotFound {
            resource: "User",
            id: id.to_string(),
        }
    }

    pub fn certificate_not_found(id: &str) -> Self {
        DatabaseError::NotFound {
            resource: "Certificate",
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DatabaseError::NotFound { .. } => codes::storage::NOT_FOUND,
            DatabaseError::Conflict(_) => codes::storage::CONFLICT,
            DatabaseError::InternalError(_) => codes::storage::INTERNAL,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            DatabaseError::NotFound { .. } => ErrorClass::NotFound,
            DatabaseError::Conflict(_) => ErrorClass::Conflict,
            DatabaseError::InternalError(_) => ErrorClass::Internal,
        }
    }
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
