//! Create and update flows that hand the input back on failure, so the
//! form can be reopened pre-filled.

use fusion_props_model::{
    PropertyBehavior, PropertyDefinition, PropertyDefinitionCollection,
    PropertySpecification,
};
use log::warn;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::{api_client::ApiClient, error::ClientError};

/// A submission the server refused, with the input that produced it.
#[derive(Debug)]
pub struct Rejected<D> {
    pub draft: D,
    pub error: ClientError,
}

impl<D> Rejected<D> {
    /// Message to show before reopening the form.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

pub type DraftResult<T, D> = std::result::Result<T, Rejected<D>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionDraft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionDraft {
    pub name: String,
    pub specification: PropertySpecification,
    pub description: String,
    pub is_hidden: bool,
    pub should_copy: bool,
    pub is_read_only: bool,
    pub behavior: PropertyBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefinitionUpdateDraft {
    pub description: String,
    pub is_hidden: bool,
}

fn reject<D>(draft: D, error: ClientError) -> Rejected<D> {
    warn!("[Drafts] submission rejected: {error}");
    Rejected { draft, error }
}

impl ApiClient {
    pub async fn submit_new_collection(
        &self,
        draft: CollectionDraft,
        cancel: &CancellationToken,
    ) -> DraftResult<PropertyDefinitionCollection, CollectionDraft> {
        match self.create_collection(&draft.name, &draft.description, cancel).await {
            Ok(collection) => Ok(collection),
            Err(error) => Err(reject(draft, error)),
        }
    }

    /// Only the description of an existing collection can change.
    pub async fn submit_collection_update(
        &self,
        collection_id: &str,
        draft: CollectionDraft,
        cancel: &CancellationToken,
    ) -> DraftResult<PropertyDefinitionCollection, CollectionDraft> {
        match self
            .update_collection(collection_id, &draft.description, cancel)
            .await
        {
            Ok(collection) => Ok(collection),
            Err(error) => Err(reject(draft, error)),
        }
    }

    pub async fn submit_new_definition(
        &self,
        collection_id: &str,
        draft: DefinitionDraft,
        cancel: &CancellationToken,
    ) -> DraftResult<PropertyDefinition, DefinitionDraft> {
        let body = json!({
            "definitionName": draft.name,
            "definitionType": draft.specification.as_str(),
            "definitionDescription": draft.description,
            "isHidden": draft.is_hidden,
            "shouldCopy": draft.should_copy,
            "isReadOnly": draft.is_read_only,
            "propertyBehavior": draft.behavior.as_str(),
        });

        match self.create_definition(collection_id, body, cancel).await {
            Ok(definition) => Ok(definition),
            Err(error) => Err(reject(draft, error)),
        }
    }

    pub async fn submit_definition_update(
        &self,
        definition_id: &str,
        draft: DefinitionUpdateDraft,
        cancel: &CancellationToken,
    ) -> DraftResult<PropertyDefinition, DefinitionUpdateDraft> {
        match self
            .update_definition(definition_id, &draft.description, draft.is_hidden, cancel)
            .await
        {
            Ok(definition) => Ok(definition),
            Err(error) => Err(reject(draft, error)),
        }
    }
}
