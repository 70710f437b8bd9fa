use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::document::QueryDocument;
use crate::error::{FusionDataError, Result};

/// GraphQL error entry as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

/// The `{data, errors}` body of a GraphQL response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlEnvelope {
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    pub fn errors(&self) -> &[GraphqlError] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    fn has_data(&self) -> bool {
        matches!(&self.data, Some(data) if !data.is_null())
    }

    /// Turns reported errors into [`FusionDataError::RemoteQuery`], except
    /// for error-tolerant operations that still carry data.
    pub fn check(self, document: &QueryDocument) -> Result<Self> {
        if !self.has_errors() {
            return Ok(self);
        }

        if document.tolerates_errors() && self.has_data() {
            warn!(
                operation = document.name,
                errors = self.errors().len(),
                first = %self.errors()[0].message,
                "GraphQL errors tolerated alongside partial data"
            );
            return Ok(self);
        }

        warn!(
            operation = document.name,
            errors = self.errors().len(),
            first = %self.errors()[0].message,
            "GraphQL request failed"
        );
        Err(FusionDataError::from_graphql_errors(self.errors()))
    }

    /// Deserializes the value at `pointer` (JSON pointer into `data`).
    ///
    /// A missing or null value is [`FusionDataError::NotFound`].
    pub fn extract<T: DeserializeOwned>(&self, pointer: &str) -> Result<T> {
        let value = self
            .data
            .as_ref()
            .and_then(|data| data.pointer(pointer))
            .filter(|value| !value.is_null())
            .ok_or_else(|| FusionDataError::not_found(pointer))?;

        T::deserialize(value).map_err(|err| {
            FusionDataError::transport(format!(
                "unexpected response shape at {pointer}: {err}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const PLAIN: QueryDocument =
        QueryDocument::new("GetThing", "query GetThing { thing }");
    const HUB: QueryDocument = QueryDocument::new(
        "GetPropertyDefinitionCollectionsByHub",
        "query GetPropertyDefinitionCollectionsByHub { nav }",
    );

    fn with_errors(data: Value) -> GraphqlEnvelope {
        serde_json::from_value(json!({
            "data": data,
            "errors": [{ "message": "denied message=Not an admin" }]
        }))
        .unwrap()
    }

    #[test]
    fn null_errors_count_as_none() {
        let envelope: GraphqlEnvelope =
            serde_json::from_value(json!({ "data": {}, "errors": null }))
                .unwrap();
        assert!(!envelope.has_errors());
    }

    #[test]
    fn errors_fail_regular_operations() {
        let err = with_errors(json!({ "thing": 1 })).check(&PLAIN).unwrap_err();
        assert_eq!(err, FusionDataError::remote("Not an admin"));
    }

    #[test]
    fn hub_listing_keeps_partial_data() {
        let envelope = with_errors(json!({ "nav": { "hub": null } }))
            .check(&HUB)
            .unwrap();
        assert!(envelope.has_errors());
    }

    #[test]
    fn hub_listing_without_data_still_fails() {
        let err = with_errors(Value::Null).check(&HUB).unwrap_err();
        assert_eq!(err.kind(), "remote_query");
    }

    #[test]
    fn null_field_is_not_found() {
        let envelope = GraphqlEnvelope::from_data(
            json!({ "componentVersion": null }),
        );
        let err = envelope
            .extract::<Value>("/componentVersion/thumbnail")
            .unwrap_err();
        assert_eq!(
            err,
            FusionDataError::not_found("/componentVersion/thumbnail")
        );
    }

    #[test]
    fn extracts_nested_values() {
        let envelope = GraphqlEnvelope::from_data(json!({
            "linkPropertyDefinitionCollection": { "hub": { "id": "H1" } }
        }));
        let hub_id: String = envelope
            .extract("/linkPropertyDefinitionCollection/hub/id")
            .unwrap();
        assert_eq!(hub_id, "H1");
    }
}
