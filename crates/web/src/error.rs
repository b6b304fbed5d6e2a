use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::dto::common::{ApiResponse, ValidationIssue};
use storage::error::StorageError;
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    /// The request body could not be parsed into the expected shape.
    InvalidBody(String),
    BadRequest(String),
    Unauthorized,
    NotFound(&'static str),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::InvalidBody(msg) => write!(f, "Invalid request body: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = match self {
            Self::Storage(e @ StorageError::NotFound(_)) => ApiResponse::failure(e.to_string()),
            Self::Storage(StorageError::ConstraintViolation(msg)) => ApiResponse::failure(msg),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ApiResponse::failure("An internal error occurred")
            }
            Self::Validation(errors) => ApiResponse::failure("Validation failed")
                .with_details(ValidationIssue::from_errors(&errors)),
            Self::InvalidBody(msg) => ApiResponse::failure("Invalid request body")
                .with_details(vec![ValidationIssue::new("body", msg)]),
            Self::BadRequest(msg) => ApiResponse::failure(msg),
            Self::Unauthorized => ApiResponse::failure("Unauthorized"),
            Self::NotFound(what) => ApiResponse::failure(format!("{} not found", what)),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
