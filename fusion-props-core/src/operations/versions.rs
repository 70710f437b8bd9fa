use fusion_props_model::{ComponentVersionProperties, DrawingVersionProperties};
use serde_json::Value;

use super::{FusionData, vars};
use crate::error::Result;
use crate::graphql::{QueryDocument, QueryExecutor};

macro_rules! measure {
    ($name:literal) => {
        concat!($name, " { value definition { units { name } } }")
    };
}

macro_rules! manage_fields {
    () => {
        "manage {
      itemNumber
      lifeCycle
      revision
      changeOrder
      changeOrderURN
    }"
    };
}

pub const GET_COMPONENT_VERSION_PROPERTIES: QueryDocument = QueryDocument::new(
    "GetComponentVersionProperties",
    concat!(
        "query GetComponentVersionProperties($componentVersionId: ID!) {
  componentVersion(componentVersionId: $componentVersionId) {
    lastModifiedOn
    partNumber
    name
    partDescription
    materialName
    ",
        manage_fields!(),
        "
    physicalProperties {
      ",
        measure!("mass"),
        "
      ",
        measure!("volume"),
        "
      ",
        measure!("density"),
        "
      ",
        measure!("area"),
        "
      boundingBox {
        ",
        measure!("length"),
        "
        ",
        measure!("width"),
        "
        ",
        measure!("height"),
        "
      }
    }
  }
}"
    ),
);

pub const GET_DRAWING_VERSION_PROPERTIES: QueryDocument = QueryDocument::new(
    "GetDrawingVersionProperties",
    concat!(
        "query GetDrawingVersionProperties($drawingVersionId: ID!) {
  drawingVersion(drawingVersionId: $drawingVersionId) {
    lastModifiedOn
    partNumber
    name
    partDescription
    ",
        manage_fields!(),
        "
  }
}"
    ),
);

impl<E: QueryExecutor> FusionData<E> {
    /// Name, manage metadata and physical properties of a component version.
    pub async fn get_general_properties_for_component_version(
        &self,
        version_id: &str,
    ) -> Result<ComponentVersionProperties> {
        self.query(
            GET_COMPONENT_VERSION_PROPERTIES,
            Value::Object(vars([("componentVersionId", Value::from(version_id))])),
            "/componentVersion",
        )
        .await
    }

    pub async fn get_general_properties_for_drawing_version(
        &self,
        version_id: &str,
    ) -> Result<DrawingVersionProperties> {
        self.query(
            GET_DRAWING_VERSION_PROPERTIES,
            Value::Object(vars([("drawingVersionId", Value::from(version_id))])),
            "/drawingVersion",
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graphql::{GraphqlEnvelope, MockQueryExecutor};

    #[test]
    fn component_document_selects_bounding_box_measures() {
        let text = GET_COMPONENT_VERSION_PROPERTIES.text;
        assert!(text.contains("height { value definition { units { name } } }"));
        assert!(text.contains("changeOrderURN"));
    }

    #[tokio::test]
    async fn component_properties_keep_units() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query()
            .withf(|_, variables| variables["componentVersionId"] == "cv1")
            .times(1)
            .returning(|_, _| {
                Ok(GraphqlEnvelope::from_data(json!({
                    "componentVersion": {
                        "name": "Bracket",
                        "partNumber": "BR-1",
                        "lastModifiedOn": "2024-03-01T10:00:00Z",
                        "manage": { "changeOrderURN": "urn:co:1" },
                        "physicalProperties": {
                            "mass": { "value": 1.5, "definition": { "units": { "name": "kg" } } }
                        }
                    }
                })))
            });

        let fusion = FusionData::with_executor(mock);
        let properties = fusion
            .get_general_properties_for_component_version("cv1")
            .await
            .unwrap();

        assert_eq!(properties.name.as_deref(), Some("Bracket"));
        let mass = properties.physical_properties.unwrap().mass.unwrap();
        assert_eq!(mass.unit_name(), Some("kg"));
        assert_eq!(
            properties.manage.unwrap().change_order_urn.as_deref(),
            Some("urn:co:1")
        );
    }

    #[tokio::test]
    async fn missing_drawing_version_is_not_found() {
        let mut mock = MockQueryExecutor::new();
        mock.expect_send_query().times(1).returning(|_, _| {
            Ok(GraphqlEnvelope::from_data(json!({ "drawingVersion": null })))
        });

        let fusion = FusionData::with_executor(mock);
        let err = fusion
            .get_general_properties_for_drawing_version("dv1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }
}
