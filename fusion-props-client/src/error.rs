use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request cancelled")]
    Cancelled,

    /// The server answered with its `{"error": {...}}` body.
    #[error("{message}")]
    Api {
        status: u16,
        kind: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    #[error("could not generate thumbnail (status {0})")]
    ThumbnailUnavailable(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    kind: Option<String>,
}

impl ClientError {
    /// Builds an [`ClientError::Api`] from a failed response body, falling
    /// back to the raw text when it is not the server's error shape.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { error }) => ClientError::Api {
                status: status.as_u16(),
                kind: error.kind.unwrap_or_else(|| "unknown".to_string()),
                message: error.message,
            },
            Err(_) => {
                let message = if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                } else {
                    body.trim().to_string()
                };
                ClientError::Api {
                    status: status.as_u16(),
                    kind: "unknown".to_string(),
                    message,
                }
            }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_server_error_body() {
        let err = ClientError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"Collection name already exists","kind":"remote_query","status":400}}"#,
        );

        match err {
            ClientError::Api { status, kind, message } => {
                assert_eq!(status, 400);
                assert_eq!(kind, "remote_query");
                assert_eq!(message, "Collection name already exists");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_text_or_reason() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.to_string(), "upstream down");

        let err = ClientError::from_response(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.to_string(), "Unauthorized");
    }
}
