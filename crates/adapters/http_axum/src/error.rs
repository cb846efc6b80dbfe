//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthome_domain::error::SmartHomeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SmartHomeError`] to an HTTP response with appropriate status code.
pub struct ApiError(SmartHomeError);

impl From<SmartHomeError> for ApiError {
    fn from(err: SmartHomeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SmartHomeError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SmartHomeError::Transport(err) => {
                tracing::warn!(error = %err, "bus transport error");
                (
                    StatusCode::BAD_GATEWAY,
                    "could not reach the message bus".to_string(),
                )
            }
            SmartHomeError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
