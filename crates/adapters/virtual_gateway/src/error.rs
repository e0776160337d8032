//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use somfyctl_domain::error::{SomfyError, ValidationError};

/// JSON error body, as the firmware sends it.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SomfyError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct GatewayError(SomfyError);

impl From<SomfyError> for GatewayError {
    fn from(err: SomfyError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for GatewayError {
    fn from(err: ValidationError) -> Self {
        Self(SomfyError::Validation(err))
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SomfyError::Validation(_) | SomfyError::Capacity(_) => StatusCode::BAD_REQUEST,
            SomfyError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let message = match &self.0 {
            SomfyError::Validation(err) => err.to_string(),
            SomfyError::NotFound(err) => err.to_string(),
            SomfyError::Capacity(err) => err.to_string(),
        };
        tracing::debug!(%status, error = %message, "request rejected");

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
