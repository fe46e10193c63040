use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::ErrorResponse;
use crate::IntakeError;

/// Converts `IntakeError` into the appropriate HTTP response.
///
/// Validation and step failures are client-facing 400s carrying the step's
/// message; credential failures are 401; everything else collapses into a
/// generic 500 that leaks no internal detail.
#[derive(Debug)]
pub struct AppError(pub IntakeError);

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            IntakeError::Validation(_) | IntakeError::Conflict(_) | IntakeError::Dependency(_) => {
                StatusCode::BAD_REQUEST
            }
            IntakeError::InvalidCredentials
            | IntakeError::TokenInvalid
            | IntakeError::TokenExpired => StatusCode::UNAUTHORIZED,
            IntakeError::PasswordHashError
            | IntakeError::ConfigurationError(_)
            | IntakeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_owned()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
