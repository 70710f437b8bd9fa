use axum::{
    Json, Router,
    routing::{get, put},
};
use serde_json::{Value, json};

use crate::{
    handlers::{collections, definitions, ids, properties, thumbnails, versions},
    infra::app_state::AppState,
};

/// Create the main API router.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/fusiondata", create_fusiondata_router())
        .route("/health", get(health_handler))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every route whose first segment is a caller-supplied id names it `{id}`;
/// the router rejects sibling parameters with different names.
fn create_fusiondata_router() -> Router<AppState> {
    Router::new()
        // Application-level collections and definitions (service token)
        .route(
            "/collections",
            get(collections::get_collections).post(collections::create_collection),
        )
        .route(
            "/collections/{collection_id}",
            put(collections::update_collection),
        )
        .route(
            "/collections/{collection_id}/definitions",
            get(definitions::get_definitions).post(definitions::create_definition),
        )
        .route(
            "/definitions/{definition_id}",
            get(definitions::get_definition)
                .put(definitions::update_definition)
                .delete(definitions::archive_definition),
        )
        // Hub links
        .route(
            "/{id}/collections",
            get(collections::get_hub_collections).post(collections::link_collection),
        )
        .route(
            "/{id}/collections/{collection_id}",
            axum::routing::delete(collections::unlink_collection),
        )
        // Component and drawing versions
        .route(
            "/component/{version_id}/generalproperties",
            get(versions::component_general_properties),
        )
        .route(
            "/drawing/{version_id}/generalproperties",
            get(versions::drawing_general_properties),
        )
        .route(
            "/component/{version_id}/thumbnailUrl",
            get(thumbnails::component_thumbnail),
        )
        .route(
            "/drawing/{version_id}/thumbnailUrl",
            get(thumbnails::drawing_thumbnail),
        )
        .route(
            "/component/{version_id}/properties",
            get(properties::component_properties),
        )
        .route(
            "/drawing/{version_id}/properties",
            get(properties::drawing_properties),
        )
        .route("/{id}/occurrences", get(versions::model_occurrences))
        .route("/{id}/alloccurrences", get(versions::all_model_occurrences))
        // Property writes against an item or version id
        .route("/{id}/properties", put(properties::set_properties))
        .route(
            "/{id}/properties/{definition_id}",
            put(properties::set_property).delete(properties::delete_property),
        )
        // Data Management id resolution
        .route("/{id}/{file_id}/versionid", get(ids::version_id))
        .route("/{id}/{file_id}/itemid", get(ids::item_id))
        .route(
            "/{id}/{file_id}/thumbnailUrl",
            get(thumbnails::file_version_thumbnail),
        )
        .route("/thumbnail/{url}", get(thumbnails::thumbnail_bytes))
}
