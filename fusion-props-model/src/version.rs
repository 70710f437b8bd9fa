use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::definition::Units;

/// Manage-extension metadata of a version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageInfo {
    pub item_number: Option<String>,
    pub life_cycle: Option<String>,
    pub revision: Option<String>,
    pub change_order: Option<String>,
    #[serde(rename = "changeOrderURN")]
    pub change_order_urn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasureDefinition {
    pub units: Option<Units>,
}

/// A physical quantity and the unit it is expressed in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Measure {
    pub value: Option<f64>,
    pub definition: Option<MeasureDefinition>,
}

impl Measure {
    pub fn unit_name(&self) -> Option<&str> {
        self.definition
            .as_ref()
            .and_then(|definition| definition.units.as_ref())
            .and_then(|units| units.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub length: Option<Measure>,
    pub width: Option<Measure>,
    pub height: Option<Measure>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalProperties {
    pub mass: Option<Measure>,
    pub volume: Option<Measure>,
    pub density: Option<Measure>,
    pub area: Option<Measure>,
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersionProperties {
    pub last_modified_on: Option<DateTime<Utc>>,
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub part_description: Option<String>,
    pub material_name: Option<String>,
    pub manage: Option<ManageInfo>,
    pub physical_properties: Option<PhysicalProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingVersionProperties {
    pub last_modified_on: Option<DateTime<Utc>>,
    pub part_number: Option<String>,
    pub name: Option<String>,
    pub part_description: Option<String>,
    pub manage: Option<ManageInfo>,
}
