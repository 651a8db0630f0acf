// src/handlers/error.rs
//! HTTP mapping of endpoint failures. Provider detail is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;

use crate::error::{GenerationError, ValidationError};
use crate::types::ErrorBody;

pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate marketing card";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    Generation(GenerationError),
    NotFound,
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => {
                tracing::warn!(missing = ?err.missing, "Rejected marketing card request");
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(err.to_string()))).into_response()
            }
            ApiError::Generation(err) => {
                let error_id = Uuid::new_v4();
                tracing::error!(
                    error_id = %error_id,
                    error = %err,
                    "Error generating marketing card"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new(GENERATION_FAILED_MESSAGE)),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND_MESSAGE))).into_response()
            }
        }
    }
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
