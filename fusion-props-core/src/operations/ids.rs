use chrono::{DateTime, Utc};
use fusion_props_model::{IdRef, ItemKind, ItemRef, VersionIds};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{FusionData, vars};
use crate::error::{FusionDataError, Result};
use crate::graphql::{GraphqlEnvelope, QueryDocument, QueryExecutor};

pub const GET_VERSION_ID: QueryDocument = QueryDocument::new(
    "GetVersionId",
    "query GetVersionId($projectId: ID!, $fileVersionId: ID!) {
  nav {
    itemVersion(projectId: $projectId, versionId: $fileVersionId) {
      ... on DesignItemVersion {
        rootComponentVersion {
          id
          lastModifiedOn
          component { id tipVersion { id } }
        }
      }
      ... on DrawingItemVersion {
        drawingVersion {
          id
          lastModifiedOn
          drawing { id tipVersion { id } }
        }
      }
    }
  }
}",
);

pub const GET_ITEM_ID: QueryDocument = QueryDocument::new(
    "GetItemId",
    "query GetItemId($projectId: ID!, $fileItemId: ID!) {
  nav {
    item(projectId: $projectId, itemId: $fileItemId) {
      ... on DesignItem {
        rootComponent { id }
      }
      ... on DrawingItem {
        drawing { id }
      }
    }
  }
}",
);

/// One side of the design/drawing union, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemVariant<T> {
    Component(T),
    Drawing(T),
}

impl<T> ItemVariant<T> {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemVariant::Component(_) => ItemKind::Component,
            ItemVariant::Drawing(_) => ItemKind::Drawing,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            ItemVariant::Component(inner) | ItemVariant::Drawing(inner) => inner,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ItemVariant<U> {
        match self {
            ItemVariant::Component(inner) => ItemVariant::Component(f(inner)),
            ItemVariant::Drawing(inner) => ItemVariant::Drawing(f(inner)),
        }
    }
}

/// Reads the union object at `pointer` and picks the non-null side.
///
/// The component field wins when both are present.
pub(crate) fn resolve_union<T: DeserializeOwned>(
    envelope: &GraphqlEnvelope,
    pointer: &str,
    component_field: &str,
    drawing_field: &str,
) -> Result<ItemVariant<T>> {
    let mut union: Map<String, Value> = envelope.extract(pointer)?;
    let mut take = |field: &str| union.remove(field).filter(|value| !value.is_null());

    let variant = if let Some(value) = take(component_field) {
        ItemVariant::Component(value)
    } else if let Some(value) = take(drawing_field) {
        ItemVariant::Drawing(value)
    } else {
        return Err(FusionDataError::not_found(format!(
            "{pointer} has neither {component_field} nor {drawing_field}"
        )));
    };

    let kind = variant.kind();
    let decoded = serde_json::from_value(variant.into_inner()).map_err(|err| {
        FusionDataError::transport(format!(
            "unexpected {kind} shape at {pointer}: {err}"
        ))
    })?;

    Ok(match kind {
        ItemKind::Component => ItemVariant::Component(decoded),
        ItemKind::Drawing => ItemVariant::Drawing(decoded),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineageNode {
    id: String,
    tip_version: IdRef,
}

/// `rootComponentVersion` or `drawingVersion`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionNode {
    id: String,
    #[serde(default)]
    last_modified_on: Option<DateTime<Utc>>,
    #[serde(rename = "component", alias = "drawing")]
    lineage: LineageNode,
}

impl<E: QueryExecutor> FusionData<E> {
    /// Resolves a Data Management file version urn to the Fusion ids.
    pub async fn get_version_id(
        &self,
        project_id: &str,
        file_version_id: &str,
    ) -> Result<VersionIds> {
        let envelope = self
            .client
            .send_query(
                GET_VERSION_ID,
                Value::Object(vars([
                    ("projectId", Value::from(project_id)),
                    ("fileVersionId", Value::from(file_version_id)),
                ])),
            )
            .await?;

        let variant: ItemVariant<VersionNode> = resolve_union(
            &envelope,
            "/nav/itemVersion",
            "rootComponentVersion",
            "drawingVersion",
        )?;
        let kind = variant.kind();
        let node = variant.into_inner();

        Ok(VersionIds {
            item_id: node.lineage.id,
            version_id: node.id,
            tip_version_id: node.lineage.tip_version.id,
            last_modified_on: node.last_modified_on,
            kind,
        })
    }

    /// Resolves a Data Management item urn to the component or drawing id.
    pub async fn get_item_id(&self, project_id: &str, file_item_id: &str) -> Result<ItemRef> {
        let envelope = self
            .client
            .send_query(
                GET_ITEM_ID,
                Value::Object(vars([
                    ("projectId", Value::from(project_id)),
                    ("fileItemId", Value::from(file_item_id)),
                ])),
            )
            .await?;

        let variant: ItemVariant<IdRef> =
            resolve_union(&envelope, "/nav/item", "rootComponent", "drawing")?;

        Ok(ItemRef {
            kind: variant.kind(),
            id: variant.into_inner().id,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graphql::MockQueryExecutor;

    fn fusion_returning(data: Value) -> FusionData<MockQueryExecutor> {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query()
            .times(1)
            .returning(move |_, _| Ok(GraphqlEnvelope::from_data(data.clone())));
        FusionData::with_executor(mock)
    }

    #[tokio::test]
    async fn version_id_of_drawing() {
        let fusion = fusion_returning(json!({ "nav": { "itemVersion": {
            "drawingVersion": {
                "id": "dv1",
                "lastModifiedOn": "2024-05-02T08:30:00Z",
                "drawing": { "id": "d1", "tipVersion": { "id": "dv2" } }
            }
        }}}));

        let ids = fusion.get_version_id("p1", "urn:fv").await.unwrap();

        assert_eq!(ids.kind, ItemKind::Drawing);
        assert_eq!(ids.item_id, "d1");
        assert_eq!(ids.version_id, "dv1");
        assert_eq!(ids.tip_version_id, "dv2");
        assert!(!ids.is_tip_version());
        assert!(ids.last_modified_on.is_some());
    }

    #[tokio::test]
    async fn version_id_of_component() {
        let fusion = fusion_returning(json!({ "nav": { "itemVersion": {
            "rootComponentVersion": {
                "id": "cv1",
                "lastModifiedOn": null,
                "component": { "id": "c1", "tipVersion": { "id": "cv1" } }
            },
            "drawingVersion": null
        }}}));

        let ids = fusion.get_version_id("p1", "urn:fv").await.unwrap();

        assert_eq!(ids.kind, ItemKind::Component);
        assert_eq!(ids.item_id, "c1");
        assert!(ids.is_tip_version());
    }

    #[tokio::test]
    async fn version_id_without_variant_is_not_found() {
        let fusion = fusion_returning(json!({ "nav": { "itemVersion": {} } }));
        let err = fusion.get_version_id("p1", "urn:fv").await.unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn item_id_of_drawing() {
        let fusion = fusion_returning(json!({ "nav": { "item": {
            "drawing": { "id": "d1" }
        }}}));
        let item = fusion.get_item_id("p1", "urn:item").await.unwrap();
        assert_eq!(item, ItemRef { id: "d1".into(), kind: ItemKind::Drawing });
    }

    #[tokio::test]
    async fn item_id_of_component() {
        let fusion = fusion_returning(json!({ "nav": { "item": {
            "rootComponent": { "id": "c1" }
        }}}));
        let item = fusion.get_item_id("p1", "urn:item").await.unwrap();
        assert_eq!(item.kind, ItemKind::Component);
        assert_eq!(item.id, "c1");
    }

    #[tokio::test]
    async fn item_id_without_variant_is_not_found() {
        let fusion = fusion_returning(json!({ "nav": { "item": {
            "rootComponent": null,
            "drawing": null
        }}}));
        let err = fusion.get_item_id("p1", "urn:item").await.unwrap_err();
        assert!(matches!(err, FusionDataError::NotFound { .. }));
    }

    #[test]
    fn component_wins_when_both_present() {
        let envelope = GraphqlEnvelope::from_data(json!({ "u": {
            "a": { "id": "component" },
            "b": { "id": "drawing" }
        }}));
        let variant: ItemVariant<IdRef> = resolve_union(&envelope, "/u", "a", "b").unwrap();
        assert_eq!(variant.kind(), ItemKind::Component);
        assert_eq!(variant.map(|node| node.id).into_inner(), "component");
    }
}
