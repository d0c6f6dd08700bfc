// --- File: crates/quadra_common/src/http.rs ---
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::{HttpStatusCode, QuadraError};
use crate::logging::log_error;

/// Extension trait for QuadraError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for QuadraError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            log_error(&self, "Request failed");
        }

        // The calendar UI shows the body as-is, so errors are plain text.
        (status_code, self.public_message()).into_response()
    }
}

/// Implement IntoResponse for QuadraError to make it easier to use in Axum handlers.
impl IntoResponse for QuadraError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

impl From<JsonRejection> for QuadraError {
    fn from(rejection: JsonRejection) -> Self {
        QuadraError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for QuadraError {
    fn from(rejection: PathRejection) -> Self {
        QuadraError::BadRequest(rejection.body_text())
    }
}
