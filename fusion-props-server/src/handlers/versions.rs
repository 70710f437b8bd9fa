use axum::{
    Json,
    extract::{Path, State},
};
use fusion_props_model::{
    ComponentVersionProperties, DrawingVersionProperties, Occurrence,
};

use crate::infra::{app_state::AppState, auth::UserToken, errors::AppResult};

pub async fn component_general_properties(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<ComponentVersionProperties>> {
    let properties = state
        .fusion_data(&token)
        .get_general_properties_for_component_version(&version_id)
        .await?;
    Ok(Json(properties))
}

pub async fn drawing_general_properties(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<DrawingVersionProperties>> {
    let properties = state
        .fusion_data(&token)
        .get_general_properties_for_drawing_version(&version_id)
        .await?;
    Ok(Json(properties))
}

/// Direct children of the component version.
pub async fn model_occurrences(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Vec<Occurrence>>> {
    let occurrences = state
        .fusion_data(&token)
        .get_model_occurrences(&version_id)
        .await?;
    Ok(Json(occurrences))
}

/// Every occurrence at any depth, each carrying its parent version.
pub async fn all_model_occurrences(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Vec<Occurrence>>> {
    let occurrences = state
        .fusion_data(&token)
        .get_all_model_occurrences(&version_id)
        .await?;
    Ok(Json(occurrences))
}
