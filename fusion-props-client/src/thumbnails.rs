use std::future::Future;
use std::time::Duration;

use fusion_props_model::{ItemKind, Thumbnail};
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::{
    api_client::ApiClient,
    error::{ClientError, Result},
};

pub const THUMBNAIL_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Shown while polling and whenever generation fails.
pub const PLACEHOLDER_THUMBNAIL: &str = "/images/box-200x200.png";

/// Polls until the thumbnail reaches a terminal status.
///
/// Returns the signed url on SUCCESS. Any other terminal status is
/// [`ClientError::ThumbnailUnavailable`].
pub async fn poll_thumbnail<F, Fut>(
    mut fetch: F,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Thumbnail>>,
{
    loop {
        let thumbnail = fetch().await?;

        if thumbnail.status.is_terminal() {
            return thumbnail
                .ready_url()
                .map(str::to_string)
                .ok_or_else(|| {
                    ClientError::ThumbnailUnavailable(thumbnail.status.as_str().to_string())
                });
        }

        debug!("[Thumbnail] status {}, polling again", thumbnail.status.as_str());
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}

impl ApiClient {
    pub async fn wait_for_thumbnail(
        &self,
        kind: ItemKind,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        poll_thumbnail(
            || self.get_thumbnail(kind, version_id, cancel),
            THUMBNAIL_POLL_INTERVAL,
            cancel,
        )
        .await
    }

    /// Signed url of the thumbnail, or the placeholder when it cannot be
    /// generated. Cancellation is still reported.
    pub async fn thumbnail_src(
        &self,
        kind: ItemKind,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        match self.wait_for_thumbnail(kind, version_id, cancel).await {
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(err) => {
                debug!("[Thumbnail] falling back to placeholder: {err}");
                Ok(PLACEHOLDER_THUMBNAIL.to_string())
            }
            Ok(url) => Ok(url),
        }
    }
}
