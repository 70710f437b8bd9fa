use thiserror::Error;

use crate::graphql::GraphqlError;

/// Marker the backend uses to embed a secondary message inside the text of
/// a GraphQL error.
const MESSAGE_MARKER: &str = "message=";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FusionDataError {
    /// The backend answered with structured GraphQL errors.
    #[error("{message}")]
    RemoteQuery { message: String },

    /// Network failure, non-GraphQL HTTP error or unreadable body.
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// An expected field of the response was absent or null.
    #[error("not found: {what}")]
    NotFound { what: String },
}

impl FusionDataError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteQuery {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn from_graphql_errors(errors: &[GraphqlError]) -> Self {
        Self::remote(get_error_message(errors))
    }

    /// Stable identifier of the error class, used in HTTP error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            FusionDataError::RemoteQuery { .. } => "remote_query",
            FusionDataError::Transport { .. } => "transport",
            FusionDataError::NotFound { .. } => "not_found",
        }
    }
}

impl From<reqwest::Error> for FusionDataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FusionDataError>;

/// Text shown to users for a list of GraphQL errors.
///
/// Only the first error counts. When its message embeds `message=`, the
/// segment following the first marker wins; an empty segment falls back to
/// the raw message.
pub fn get_error_message(errors: &[GraphqlError]) -> String {
    match errors.first() {
        Some(error) => strip_message_marker(&error.message).to_string(),
        None => "unknown GraphQL error".to_string(),
    }
}

pub(crate) fn strip_message_marker(message: &str) -> &str {
    match message.split(MESSAGE_MARKER).nth(1) {
        Some(inner) if !inner.is_empty() => inner,
        _ => message,
    }
}
