// Wire types shared by the generation endpoint and the client

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, SchemaType};

/// Input of one card generation: what the user typed and picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub product_name: String,
    pub category: String,
}

impl GenerationRequest {
    pub fn new(product_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            category: category.into(),
        }
    }
}

/// Marketing copy produced for one `GenerationRequest`.
///
/// `description` is asked to stay within two sentences and `tags` to hold
/// five keywords, but neither is enforced here; the model decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl GenerationResult {
    /// Output shape declared to the provider and checked on the way back.
    pub fn output_schema() -> Schema {
        Schema::object(
            vec![
                (
                    "title",
                    Schema::string("A catchy title for the product.").non_empty(),
                ),
                (
                    "description",
                    Schema::string("A short description (max 2 sentences) of the product.")
                        .non_empty(),
                ),
                (
                    "tags",
                    Schema::array(
                        "An array of 5 keyword tags for the product.",
                        Schema::new(SchemaType::String),
                    ),
                ),
            ],
            &["title", "description", "tags"],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Body of every non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
