use std::fmt;

use serde::{Deserialize, Serialize};

/// Write-access behavior of a property definition.
///
/// The behavior decides which entity a value is written against: TIMELESS
/// values live on the item (lineage) while all other behaviors are scoped to
/// a single version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyBehavior {
    /// Tip-version scoped; writing creates a new version.
    Standard,
    /// Version scoped, no new version.
    Dynamic,
    /// Version scoped, pinned to the version it was written on.
    DynamicAtVersion,
    /// Lineage scoped.
    Timeless,
}

impl PropertyBehavior {
    /// Whether values of this behavior are written against the item id
    /// instead of the version id.
    pub fn is_component_level(self) -> bool {
        matches!(self, PropertyBehavior::Timeless)
    }

    /// Whether writing a value of this behavior produces a new version.
    pub fn is_standard(self) -> bool {
        matches!(self, PropertyBehavior::Standard)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyBehavior::Standard => "STANDARD",
            PropertyBehavior::Dynamic => "DYNAMIC",
            PropertyBehavior::DynamicAtVersion => "DYNAMIC_AT_VERSION",
            PropertyBehavior::Timeless => "TIMELESS",
        }
    }
}

impl fmt::Display for PropertyBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value type of a property definition.
///
/// Unknown specifications reported by the backend are kept verbatim so they
/// survive a round trip through the REST surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertySpecification {
    Boolean,
    String,
    Integer,
    Float,
    Other(String),
}

impl PropertySpecification {
    pub fn as_str(&self) -> &str {
        match self {
            PropertySpecification::Boolean => "BOOLEAN",
            PropertySpecification::String => "STRING",
            PropertySpecification::Integer => "INTEGER",
            PropertySpecification::Float => "FLOAT",
            PropertySpecification::Other(raw) => raw,
        }
    }
}

impl From<String> for PropertySpecification {
    fn from(value: String) -> Self {
        match value.as_str() {
            "BOOLEAN" => PropertySpecification::Boolean,
            "STRING" => PropertySpecification::String,
            "INTEGER" => PropertySpecification::Integer,
            "FLOAT" => PropertySpecification::Float,
            _ => PropertySpecification::Other(value),
        }
    }
}

impl From<PropertySpecification> for String {
    fn from(value: PropertySpecification) -> Self {
        match value {
            PropertySpecification::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PropertySpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_timeless_is_component_level() {
        assert!(PropertyBehavior::Timeless.is_component_level());
        assert!(!PropertyBehavior::Standard.is_component_level());
        assert!(!PropertyBehavior::Dynamic.is_component_level());
        assert!(!PropertyBehavior::DynamicAtVersion.is_component_level());
    }

    #[test]
    fn behavior_uses_upstream_enum_names() {
        let parsed: PropertyBehavior =
            serde_json::from_str("\"DYNAMIC_AT_VERSION\"").unwrap();
        assert_eq!(parsed, PropertyBehavior::DynamicAtVersion);
        assert_eq!(
            serde_json::to_string(&PropertyBehavior::Timeless).unwrap(),
            "\"TIMELESS\""
        );
    }

    #[test]
    fn unknown_specification_is_preserved() {
        let parsed: PropertySpecification =
            serde_json::from_str("\"DATE\"").unwrap();
        assert_eq!(parsed, PropertySpecification::Other("DATE".into()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"DATE\"");

        let float: PropertySpecification =
            serde_json::from_str("\"FLOAT\"").unwrap();
        assert_eq!(float, PropertySpecification::Float);
    }
}
