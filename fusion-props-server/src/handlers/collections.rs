use axum::{
    Json,
    extract::{Path, State},
};
use fusion_props_core::PaginationMode;
use fusion_props_model::PropertyDefinitionCollection;
use serde::Deserialize;
use tracing::info;

use crate::infra::{
    app_state::AppState,
    auth::{ServiceToken, UserToken},
    errors::AppResult,
    extract::{JsonBody, QueryParams},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub collection_name: String,
    #[serde(default)]
    pub collection_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionRequest {
    #[serde(default)]
    pub collection_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCollectionRequest {
    pub collection_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HubCollectionsQuery {
    #[serde(default)]
    pub minimal: Option<String>,
}

impl HubCollectionsQuery {
    /// Any value other than empty, `0` or `false` asks for the minimal page.
    pub fn is_minimal(&self) -> bool {
        self.minimal.as_deref().is_some_and(|raw| {
            let raw = raw.trim();
            !(raw.is_empty() || raw == "0" || raw.eq_ignore_ascii_case("false"))
        })
    }
}

pub async fn get_collections(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
) -> AppResult<Json<Vec<PropertyDefinitionCollection>>> {
    let collections = state.fusion_data(&token).get_collections().await?;
    Ok(Json(collections))
}

pub async fn create_collection(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    JsonBody(request): JsonBody<CreateCollectionRequest>,
) -> AppResult<Json<PropertyDefinitionCollection>> {
    let collection = state
        .fusion_data(&token)
        .create_collection(&request.collection_name, &request.collection_description)
        .await?;
    info!(collection_id = %collection.id, "created property definition collection");
    Ok(Json(collection))
}

pub async fn update_collection(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(collection_id): Path<String>,
    JsonBody(request): JsonBody<UpdateCollectionRequest>,
) -> AppResult<Json<PropertyDefinitionCollection>> {
    let collection = state
        .fusion_data(&token)
        .update_collection(&collection_id, &request.collection_description)
        .await?;
    Ok(Json(collection))
}

pub async fn get_hub_collections(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(hub_id): Path<String>,
    QueryParams(query): QueryParams<HubCollectionsQuery>,
) -> AppResult<Json<Vec<PropertyDefinitionCollection>>> {
    let mode = PaginationMode::from_flag(query.is_minimal());
    let collections = state
        .fusion_data(&token)
        .get_collections_by_hub(&hub_id, mode)
        .await?;
    Ok(Json(collections))
}

/// Responds with the id of the hub.
pub async fn link_collection(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(hub_id): Path<String>,
    JsonBody(request): JsonBody<LinkCollectionRequest>,
) -> AppResult<Json<String>> {
    let hub = state
        .fusion_data(&token)
        .link_collection_to_hub(&hub_id, &request.collection_id)
        .await?;
    info!(hub_id = %hub, collection_id = %request.collection_id, "linked collection to hub");
    Ok(Json(hub))
}

pub async fn unlink_collection(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((hub_id, collection_id)): Path<(String, String)>,
) -> AppResult<Json<String>> {
    let hub = state
        .fusion_data(&token)
        .unlink_collection_from_hub(&hub_id, &collection_id)
        .await?;
    info!(hub_id = %hub, %collection_id, "unlinked collection from hub");
    Ok(Json(hub))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(raw: Option<&str>) -> HubCollectionsQuery {
        HubCollectionsQuery {
            minimal: raw.map(str::to_string),
        }
    }

    #[test]
    fn minimal_flag_is_lenient() {
        assert!(query(Some("true")).is_minimal());
        assert!(query(Some("1")).is_minimal());
        assert!(query(Some("yes")).is_minimal());
        assert!(!query(Some("false")).is_minimal());
        assert!(!query(Some("0")).is_minimal());
        assert!(!query(Some("")).is_minimal());
        assert!(!query(None).is_minimal());
    }
}
