use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::ServiceError;
use tracing::warn;

use crate::response::JsonUtf8;

/// Error envelope `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        if e.is_storage() {
            warn!(kind = ?e.kind(), error = %e, "person store failure");
        }
        Self::bad_request(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = JsonUtf8(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
