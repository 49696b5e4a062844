//! HTTP rendering of [`Error`].
//!
//! Client mistakes become `400`, store and startup failures `500`. The body
//! is always `{"error": "<message>"}`.

use super::payloads::ErrorResponse;
use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            warn!("Rejected request: {self}");
            StatusCode::BAD_REQUEST
        } else {
            error!("Request failed: {self}");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPayload {
            message: rejection.body_text(),
        }
    }
}
