use fusion_props_model::{CustomProperty, PropertyInput, SetPropertiesResult};
use serde_json::{Value, json};

use super::{FusionData, vars};
use crate::error::Result;
use crate::graphql::{QueryDocument, QueryExecutor};

macro_rules! custom_properties {
    () => {
        "customProperties {
      results {
        value
        definition {
          id
          name
          specification
          isHidden
          shouldCopy
          description
          propertyBehavior
          units { name }
        }
      }
    }"
    };
}

pub const GET_COMPONENT_VERSION_CUSTOM_PROPERTIES: QueryDocument = QueryDocument::new(
    "GetComponentVersionCustomProperties",
    concat!(
        "query GetComponentVersionCustomProperties($componentVersionId: ID!) {
  componentVersion(componentVersionId: $componentVersionId) {
    ",
        custom_properties!(),
        "
  }
}"
    ),
);

pub const GET_DRAWING_VERSION_CUSTOM_PROPERTIES: QueryDocument = QueryDocument::new(
    "GetDrawingVersionCustomProperties",
    concat!(
        "query GetDrawingVersionCustomProperties($drawingVersionId: ID!) {
  drawingVersion(drawingVersionId: $drawingVersionId) {
    ",
        custom_properties!(),
        "
  }
}"
    ),
);

/// Writes and clears go through the same mutation; a clear is an input with
/// `shouldClear: true` instead of a value.
pub const SET_PROPERTIES: QueryDocument = QueryDocument::new(
    "SetProperties",
    "mutation SetProperties($input: SetPropertiesInput!) {
  setProperties(input: $input) {
    targetId
  }
}",
);

impl<E: QueryExecutor> FusionData<E> {
    pub async fn get_properties_for_component_version(
        &self,
        version_id: &str,
    ) -> Result<Vec<CustomProperty>> {
        self.query(
            GET_COMPONENT_VERSION_CUSTOM_PROPERTIES,
            Value::Object(vars([("componentVersionId", Value::from(version_id))])),
            "/componentVersion/customProperties/results",
        )
        .await
    }

    pub async fn get_properties_for_drawing_version(
        &self,
        version_id: &str,
    ) -> Result<Vec<CustomProperty>> {
        self.query(
            GET_DRAWING_VERSION_CUSTOM_PROPERTIES,
            Value::Object(vars([("drawingVersionId", Value::from(version_id))])),
            "/drawingVersion/customProperties/results",
        )
        .await
    }

    /// Writes every input against `target_id` in one mutation.
    ///
    /// The target must be the item id for TIMELESS definitions and the
    /// version id for all others; choosing it is up to the caller.
    pub async fn set_properties(
        &self,
        target_id: &str,
        inputs: &[PropertyInput],
    ) -> Result<SetPropertiesResult> {
        let input = json!({
            "targetId": target_id,
            "propertyInputs": inputs,
        });
        self.query(SET_PROPERTIES, json!({ "input": input }), "/setProperties")
            .await
    }

    pub async fn set_property(
        &self,
        target_id: &str,
        definition_id: &str,
        value: Value,
    ) -> Result<SetPropertiesResult> {
        self.set_properties(target_id, &[PropertyInput::new(definition_id, value)])
            .await
    }

    /// Clears one value.
    pub async fn delete_property(
        &self,
        target_id: &str,
        definition_id: &str,
    ) -> Result<SetPropertiesResult> {
        let input = json!({
            "targetId": target_id,
            "propertyInputs": [{
                "propertyDefinitionId": definition_id,
                "shouldClear": true,
            }],
        });
        self.query(SET_PROPERTIES, json!({ "input": input }), "/setProperties")
            .await
    }
}
