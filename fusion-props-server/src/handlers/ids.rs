use axum::{
    Json,
    extract::{Path, State},
};
use fusion_props_model::{ItemRef, VersionIds};

use crate::infra::{app_state::AppState, auth::UserToken, errors::AppResult};

pub async fn version_id(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((project_id, file_version_id)): Path<(String, String)>,
) -> AppResult<Json<VersionIds>> {
    let ids = state
        .fusion_data(&token)
        .get_version_id(&project_id, &file_version_id)
        .await?;
    Ok(Json(ids))
}

pub async fn item_id(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((project_id, file_item_id)): Path<(String, String)>,
) -> AppResult<Json<ItemRef>> {
    let item = state
        .fusion_data(&token)
        .get_item_id(&project_id, &file_item_id)
        .await?;
    Ok(Json(item))
}
