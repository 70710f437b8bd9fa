use axum::{
    Json,
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};
use fusion_props_model::Thumbnail;
use tracing::warn;

use crate::infra::{app_state::AppState, auth::UserToken, errors::AppResult};

/// Used when the signed url responds without a content type.
const FALLBACK_CONTENT_TYPE: &str = "image/png";

pub async fn component_thumbnail(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Thumbnail>> {
    let thumbnail = state
        .fusion_data(&token)
        .get_component_version_thumbnail(&version_id)
        .await?;
    Ok(Json(thumbnail))
}

pub async fn drawing_thumbnail(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(version_id): Path<String>,
) -> AppResult<Json<Thumbnail>> {
    let thumbnail = state
        .fusion_data(&token)
        .get_drawing_version_thumbnail(&version_id)
        .await?;
    Ok(Json(thumbnail))
}

/// Never fails: anything that goes wrong becomes a redirect to the
/// placeholder image so `<img>` tags keep rendering.
pub async fn file_version_thumbnail(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path((project_id, file_version_id)): Path<(String, String)>,
) -> Response {
    match state
        .fusion_data(&token)
        .get_file_version_thumbnail(&project_id, &file_version_id)
        .await
    {
        Ok(thumbnail) => Json(thumbnail).into_response(),
        Err(err) => {
            warn!(%file_version_id, error = %err, "file version thumbnail unavailable");
            Redirect::to(&state.config().thumbnails.placeholder).into_response()
        }
    }
}

/// Proxies the signed url so the browser never sees the bearer token.
pub async fn thumbnail_bytes(
    State(state): State<AppState>,
    UserToken(token): UserToken,
    Path(url): Path<String>,
) -> AppResult<Response> {
    let thumbnail = state.fusion_data(&token).get_thumbnail_for_url(&url).await?;
    let content_type = thumbnail
        .content_type
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
    Ok(([(CONTENT_TYPE, content_type)], thumbnail.bytes).into_response())
}
