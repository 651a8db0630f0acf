use axum::{http::header, Extension, Router};
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::handlers::{
    error::not_found, health::health_routes, marketing_card::marketing_card_routes,
};
use crate::middleware::{cors, logging};
use crate::AppState;

/// Full application router with the API mounted under `api_prefix`
/// (already normalised; empty means the root).
pub fn build_router(state: Arc<AppState>, api_prefix: &str) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .merge(marketing_card_routes());

    let mut app = if api_prefix.is_empty() {
        api
    } else {
        Router::new().nest(api_prefix, api)
    };

    app = app
        .fallback(not_found)
        .layer(axum::middleware::from_fn(cors::preflight_middleware))
        .layer(axum::middleware::from_fn(logging::request_logging_middleware))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            cors::json_content_type(),
        ));

    for (name, value) in cors::response_headers() {
        app = app.layer(SetResponseHeaderLayer::overriding(name, value));
    }

    app.layer(Extension(state))
}
