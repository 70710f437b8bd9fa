use serde::{Deserialize, Serialize};

/// Generation state of a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThumbnailStatus {
    Pending,
    InProgress,
    Success,
    Failed,
    Other(String),
}

impl ThumbnailStatus {
    /// Anything other than PENDING or IN_PROGRESS ends polling.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ThumbnailStatus::Pending | ThumbnailStatus::InProgress)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ThumbnailStatus::Pending => "PENDING",
            ThumbnailStatus::InProgress => "IN_PROGRESS",
            ThumbnailStatus::Success => "SUCCESS",
            ThumbnailStatus::Failed => "FAILED",
            ThumbnailStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for ThumbnailStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => ThumbnailStatus::Pending,
            "IN_PROGRESS" => ThumbnailStatus::InProgress,
            "SUCCESS" => ThumbnailStatus::Success,
            "FAILED" => ThumbnailStatus::Failed,
            _ => ThumbnailStatus::Other(value),
        }
    }
}

impl From<ThumbnailStatus> for String {
    fn from(value: ThumbnailStatus) -> Self {
        match value {
            ThumbnailStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub status: ThumbnailStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_url: Option<String>,
}

impl Thumbnail {
    /// The signed url, once generation succeeded.
    pub fn ready_url(&self) -> Option<&str> {
        match self.status {
            ThumbnailStatus::Success => self.signed_url.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_states_are_not_terminal() {
        assert!(!ThumbnailStatus::Pending.is_terminal());
        assert!(!ThumbnailStatus::InProgress.is_terminal());
        assert!(ThumbnailStatus::Success.is_terminal());
        assert!(ThumbnailStatus::Failed.is_terminal());
        assert!(ThumbnailStatus::Other("TIMEOUT".into()).is_terminal());
    }

    #[test]
    fn ready_url_requires_success() {
        let failed = Thumbnail {
            status: ThumbnailStatus::Failed,
            signed_url: Some("https://example.test/t.png".into()),
        };
        assert_eq!(failed.ready_url(), None);

        let done: Thumbnail = serde_json::from_str(
            r#"{"status":"SUCCESS","signedUrl":"https://example.test/t.png"}"#,
        )
        .unwrap();
        assert_eq!(done.ready_url(), Some("https://example.test/t.png"));
    }
}
