// src/handlers/marketing_card.rs
//! Marketing card generation endpoint

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::flow::validate_request;
use crate::handlers::error::{not_found, ApiError};
use crate::types::GenerationResult;
use crate::AppState;

/// Raw request body; presence of the fields is checked by hand so a missing
/// field gets the same 400 as an empty one.
#[derive(Debug, Deserialize)]
pub struct GenerateCardPayload {
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /generate-marketing-card - Generate title, description and tags
pub async fn generate_marketing_card(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<GenerateCardPayload>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!("Unreadable marketing card body: {}", rejection.body_text());
            return Err(ValidationError {
                missing: vec!["productName", "category"],
            }
            .into());
        }
    };

    let request = validate_request(payload.product_name.as_deref(), payload.category.as_deref())?;
    let result = state.card_flow.generate(&request).await?;
    Ok(Json(result))
}

pub fn marketing_card_routes() -> Router {
    Router::new().route(
        "/generate-marketing-card",
        post(generate_marketing_card).fallback(not_found),
    )
}
