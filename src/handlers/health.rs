// src/handlers/health.rs

use axum::{response::Json, routing::get, Router};

use crate::handlers::error::not_found;
use crate::types::HealthResponse;

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health).fallback(not_found))
}
