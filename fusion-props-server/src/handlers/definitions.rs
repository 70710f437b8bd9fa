use axum::{
    Json,
    extract::{Path, State},
};
use fusion_props_model::{
    NewPropertyDefinition, PropertyBehavior, PropertyDefinition,
    PropertySpecification,
};
use serde::Deserialize;
use tracing::info;

use crate::infra::{
    app_state::AppState, auth::ServiceToken, errors::AppResult, extract::JsonBody,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDefinitionRequest {
    pub definition_name: String,
    pub definition_type: PropertySpecification,
    #[serde(default)]
    pub definition_description: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub should_copy: bool,
    #[serde(default)]
    pub is_read_only: bool,
    pub property_behavior: PropertyBehavior,
}

impl From<CreateDefinitionRequest> for NewPropertyDefinition {
    fn from(request: CreateDefinitionRequest) -> Self {
        NewPropertyDefinition {
            name: request.definition_name,
            specification: request.definition_type,
            description: request.definition_description,
            is_hidden: request.is_hidden,
            should_copy: request.should_copy,
            is_read_only: request.is_read_only,
            property_behavior: request.property_behavior,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDefinitionRequest {
    #[serde(default)]
    pub definition_description: String,
    #[serde(default)]
    pub is_hidden: bool,
}

pub async fn get_definitions(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(collection_id): Path<String>,
) -> AppResult<Json<Vec<PropertyDefinition>>> {
    let definitions = state.fusion_data(&token).get_definitions(&collection_id).await?;
    Ok(Json(definitions))
}

pub async fn create_definition(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(collection_id): Path<String>,
    JsonBody(request): JsonBody<CreateDefinitionRequest>,
) -> AppResult<Json<PropertyDefinition>> {
    let definition = state
        .fusion_data(&token)
        .create_definition(&collection_id, &request.into())
        .await?;
    info!(%collection_id, definition_id = %definition.id, "created property definition");
    Ok(Json(definition))
}

pub async fn get_definition(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(definition_id): Path<String>,
) -> AppResult<Json<PropertyDefinition>> {
    let definition = state.fusion_data(&token).get_definition(&definition_id).await?;
    Ok(Json(definition))
}

pub async fn update_definition(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(definition_id): Path<String>,
    JsonBody(request): JsonBody<UpdateDefinitionRequest>,
) -> AppResult<Json<PropertyDefinition>> {
    let definition = state
        .fusion_data(&token)
        .update_definition(
            &definition_id,
            &request.definition_description,
            request.is_hidden,
        )
        .await?;
    Ok(Json(definition))
}

pub async fn archive_definition(
    State(state): State<AppState>,
    ServiceToken(token): ServiceToken,
    Path(definition_id): Path<String>,
) -> AppResult<Json<PropertyDefinition>> {
    let definition = state
        .fusion_data(&token)
        .archive_definition(&definition_id)
        .await?;
    info!(%definition_id, "archived property definition");
    Ok(Json(definition))
}
