use serde::{Deserialize, Serialize};

use crate::definition::DefinitionList;

/// A named group of property definitions, optionally linked to hubs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinitionCollection {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only populated by the hub-scoped listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<DefinitionList>,
}

impl PropertyDefinitionCollection {
    pub fn definition_count(&self) -> usize {
        self.definitions
            .as_ref()
            .map(|list| list.results.len())
            .unwrap_or(0)
    }
}
