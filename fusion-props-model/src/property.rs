use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::behavior::{PropertyBehavior, PropertySpecification};
use crate::definition::Units;

/// Definition fields selected alongside a custom property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPropertyDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specification: Option<PropertySpecification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_copy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_behavior: Option<PropertyBehavior>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
}

/// A value attached to a version or item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    #[serde(default)]
    pub value: Value,
    pub definition: CustomPropertyDefinition,
}

/// One `{propertyDefinitionId, value}` pair of a property write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub property_definition_id: String,
    #[serde(default)]
    pub value: Value,
}

impl PropertyInput {
    pub fn new(property_definition_id: impl Into<String>, value: Value) -> Self {
        Self {
            property_definition_id: property_definition_id.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPropertiesResult {
    pub target_id: String,
}
