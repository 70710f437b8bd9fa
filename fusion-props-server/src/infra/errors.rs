use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::warn;

use fusion_props_core::FusionDataError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    /// Error class reported to the UI (`remote_query`, `transport`, ...).
    pub kind: &'static str,
    pub message: String,
}

impl AppError {
    pub fn new(
        status: StatusCode,
        kind: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "message": self.message,
                "kind": self.kind,
                "status": self.status.as_u16(),
            }
        }));

        (self.status, body).into_response()
    }
}

/// Every upstream failure is reported as 400 with the message verbatim.
impl From<FusionDataError> for AppError {
    fn from(err: FusionDataError) -> Self {
        warn!(kind = err.kind(), error = %err, "fusion data operation failed");
        let message = match &err {
            FusionDataError::RemoteQuery { message } => message.clone(),
            _ => err.to_string(),
        };
        Self::new(StatusCode::BAD_REQUEST, err.kind(), message)
    }
}

/// Malformed bodies are answered with the same envelope as upstream failures.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_keep_backend_text() {
        let err = AppError::from(FusionDataError::remote("Not an admin"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "remote_query");
        assert_eq!(err.message, "Not an admin");
    }

    #[test]
    fn not_found_maps_to_bad_request() {
        let err = AppError::from(FusionDataError::not_found("/nav/item"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.kind, "not_found");
    }
}
