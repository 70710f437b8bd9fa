use axum::{
    Json,
    extract::{Path, State},
};
use fusion_props_model::{CustomProperty, PropertyInput, SetPropertiesResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::infra::{
    app_state::AppState,
    auth::UserToken,
    errors::{AppError, AppResult},
    extract::JsonBody,
};

#[derive(Debug, Deserialize)]
pub struct SetPropertiesRequest {
    pub properties: Vec<PropertyInput>,
}

#[derive(Debug, Deserialize)]
pub struct SetPropertyRequest {
    #[serde(default)]
    pub value: Value,
}

pub async fn component_properties(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Vec<CustomProperty>>> {
    let properties = state
        .fusion_data(&token)
        .get_properties_for_component_version(&version_id)
        .await?;
    Ok(Json(properties))
}

pub async fn drawing_properties(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Vec<CustomProperty>>> {
    let properties = state
        .fusion_data(&token)
        .get_properties_for_drawing_version(&version_id)
        .await?;
    Ok(Json(properties))
}

pub async fn set_properties(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(target_id): Path<String>,
    JsonBody(request): JsonBody<SetPropertiesRequest>,
) -> AppResult<Json<SetPropertiesResult>> {
    if request.properties.is_empty() {
        return Err(AppError::bad_request("no properties to set"));
    }

    debug!(%target_id, count = request.properties.len(), "setting properties");
    let result = state
        .fusion_data(&token)
        .set_properties(&target_id, &request.properties)
        .await?;
    Ok(Json(result))
}

pub async fn set_property(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((target_id, definition_id)): Path<(String, String)>,
    JsonBody(request): JsonBody<SetPropertyRequest>,
) -> AppResult<Json<SetPropertiesResult>> {
    let result = state
        .fusion_data(&token)
        .set_property(&target_id, &definition_id, request.value)
        .await?;
    Ok(Json(result))
}

pub async fn delete_property(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((target_id, definition_id)): Path<(String, String)>,
) -> AppResult<Json<SetPropertiesResult>> {
    let result = state
        .fusion_data(&token)
        .delete_property(&target_id, &definition_id)
        .await?;
    Ok(Json(result))
}
