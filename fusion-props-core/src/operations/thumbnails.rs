use fusion_props_model::Thumbnail;
use serde::Deserialize;
use serde_json::Value;

use super::ids::{ItemVariant, resolve_union};
use super::{FusionData, vars};
use crate::error::{FusionDataError, Result};
use crate::graphql::{BinaryResource, QueryDocument, QueryExecutor};

macro_rules! thumbnail_fields {
    () => {
        "id
    thumbnail {
      status
      signedUrl
    }"
    };
}

pub const GET_COMPONENT_VERSION_THUMBNAIL: QueryDocument = QueryDocument::new(
    "GetComponentVersionThumbnail",
    concat!(
        "query GetComponentVersionThumbnail($componentVersionId: ID!) {
  componentVersion(componentVersionId: $componentVersionId) {
    ",
        thumbnail_fields!(),
        "
  }
}"
    ),
);

pub const GET_DRAWING_VERSION_THUMBNAIL: QueryDocument = QueryDocument::new(
    "GetDrawingVersionThumbnail",
    concat!(
        "query GetDrawingVersionThumbnail($drawingVersionId: ID!) {
  drawingVersion(drawingVersionId: $drawingVersionId) {
    ",
        thumbnail_fields!(),
        "
  }
}"
    ),
);

pub const GET_FILE_VERSION_THUMBNAIL: QueryDocument = QueryDocument::new(
    "GetFileVersionThumbnail",
    concat!(
        "query GetFileVersionThumbnail($projectId: ID!, $fileVersionId: ID!) {
  nav {
    itemVersion(projectId: $projectId, versionId: $fileVersionId) {
      ... on DesignItemVersion {
        rootComponentVersion {
          ",
        thumbnail_fields!(),
        "
        }
      }
      ... on DrawingItemVersion {
        drawingVersion {
          ",
        thumbnail_fields!(),
        "
        }
      }
    }
  }
}"
    ),
);

#[derive(Debug, Deserialize)]
struct ThumbnailNode {
    #[serde(default)]
    thumbnail: Option<Thumbnail>,
}

impl<E: QueryExecutor> FusionData<E> {
    /// Current thumbnail state; a single fetch, polling is the caller's job.
    pub async fn get_component_version_thumbnail(&self, version_id: &str) -> Result<Thumbnail> {
        self.query(
            GET_COMPONENT_VERSION_THUMBNAIL,
            Value::Object(vars([("componentVersionId", Value::from(version_id))])),
            "/componentVersion/thumbnail",
        )
        .await
    }

    pub async fn get_drawing_version_thumbnail(&self, version_id: &str) -> Result<Thumbnail> {
        self.query(
            GET_DRAWING_VERSION_THUMBNAIL,
            Value::Object(vars([("drawingVersionId", Value::from(version_id))])),
            "/drawingVersion/thumbnail",
        )
        .await
    }

    /// Thumbnail of whatever a file version urn resolves to.
    pub async fn get_file_version_thumbnail(
        &self,
        project_id: &str,
        file_version_id: &str,
    ) -> Result<Thumbnail> {
        let envelope = self
            .client
            .send_query(
                GET_FILE_VERSION_THUMBNAIL,
                Value::Object(vars([
                    ("projectId", Value::from(project_id)),
                    ("fileVersionId", Value::from(file_version_id)),
                ])),
            )
            .await?;

        let variant: ItemVariant<ThumbnailNode> = resolve_union(
            &envelope,
            "/nav/itemVersion",
            "rootComponentVersion",
            "drawingVersion",
        )?;
        let kind = variant.kind();

        variant
            .into_inner()
            .thumbnail
            .ok_or_else(|| FusionDataError::not_found(format!("{kind} thumbnail")))
    }

    /// Raw bytes behind a signed thumbnail url, with their content type.
    pub async fn get_thumbnail_for_url(&self, url: &str) -> Result<BinaryResource> {
        self.client.fetch_bytes(url).await
    }
}

#[cfg(test)]
mod tests {
    use fusion_props_model::ThumbnailStatus;
    use serde_json::json;

    use super::*;
    use crate::graphql::{GraphqlEnvelope, MockQueryExecutor};

    #[tokio::test]
    async fn pending_thumbnail_has_no_ready_url() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query()
            .withf(|document, variables| {
                document.name == "GetComponentVersionThumbnail"
                    && variables["componentVersionId"] == "cv1"
            })
            .times(1)
            .returning(|_, _| {
                Ok(GraphqlEnvelope::from_data(json!({
                    "componentVersion": { "id": "cv1", "thumbnail": {
                        "status": "PENDING", "signedUrl": null
                    }}
                })))
            });

        let fusion = FusionData::with_executor(mock);
        let thumbnail = fusion.get_component_version_thumbnail("cv1").await.unwrap();

        assert_eq!(thumbnail.status, ThumbnailStatus::Pending);
        assert_eq!(thumbnail.ready_url(), None);
    }

    #[tokio::test]
    async fn file_version_thumbnail_resolves_drawing_side() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query().times(1).returning(|_, _| {
            Ok(GraphqlEnvelope::from_data(json!({ "nav": { "itemVersion": {
                "drawingVersion": { "id": "dv1", "thumbnail": {
                    "status": "SUCCESS", "signedUrl": "https://cdn.test/dv1.png"
                }}
            }}})))
        });

        let fusion = FusionData::with_executor(mock);
        let thumbnail = fusion
            .get_file_version_thumbnail("p1", "urn:fv")
            .await
            .unwrap();

        assert_eq!(thumbnail.ready_url(), Some("https://cdn.test/dv1.png"));
    }

    #[tokio::test]
    async fn file_version_without_thumbnail_is_not_found() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query().times(1).returning(|_, _| {
            Ok(GraphqlEnvelope::from_data(json!({ "nav": { "itemVersion": {
                "rootComponentVersion": { "id": "cv1", "thumbnail": null }
            }}})))
        });

        let fusion = FusionData::with_executor(mock);
        let err = fusion
            .get_file_version_thumbnail("p1", "urn:fv")
            .await
            .unwrap_err();
        assert_eq!(err, FusionDataError::not_found("component thumbnail"));
    }

    #[tokio::test]
    async fn thumbnail_bytes_pass_through() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_fetch_bytes()
            .withf(|url| url.ends_with("/dv1.png"))
            .times(1)
            .returning(|_| {
                Ok(BinaryResource {
                    content_type: Some("image/png".into()),
                    bytes: vec![0x89, 0x50, 0x4e, 0x47],
                })
            });

        let fusion = FusionData::with_executor(mock);
        let thumbnail = fusion
            .get_thumbnail_for_url("https://cdn.test/dv1.png")
            .await
            .unwrap();
        assert_eq!(thumbnail.bytes, [0x89, 0x50, 0x4e, 0x47]);
        assert_eq!(thumbnail.content_type.as_deref(), Some("image/png"));
    }
}
