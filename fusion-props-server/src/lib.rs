//! REST proxy in front of the Fusion Data GraphQL API.
//!
//! Each route under `/api/fusiondata` maps onto one
//! [`fusion_props_core::FusionData`] operation and answers with its JSON
//! result. Failures surface as `400 {"error": ...}` bodies carrying the
//! upstream message; the file-version thumbnail route redirects to a
//! placeholder image instead.

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{Router, http::HeaderValue};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::infra::app_state::AppState;

/// Full application router with CORS and request tracing applied.
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config()
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let cors_layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::create_api_router()
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
