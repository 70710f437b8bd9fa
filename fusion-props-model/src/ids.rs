use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the item-version union a file resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Component,
    Drawing,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Component => "component",
            ItemKind::Drawing => "drawing",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ids resolved from a file version urn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionIds {
    pub item_id: String,
    pub version_id: String,
    pub tip_version_id: String,
    pub last_modified_on: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

impl VersionIds {
    pub fn is_tip_version(&self) -> bool {
        self.version_id == self.tip_version_id
    }
}

/// Id of the component or drawing behind a file item urn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}
