// Marketing card generation: prompt -> provider -> schema-checked result

use std::sync::Arc;

use serde_json::Value;

use crate::error::{GenerationError, ValidationError};
use crate::prompt::marketing_card_prompt;
use crate::provider::GenerativeProvider;
use crate::schema::Schema;
use crate::types::{GenerationRequest, GenerationResult};

#[derive(Clone)]
pub struct MarketingCardFlow {
    provider: Arc<dyn GenerativeProvider>,
    schema: Schema,
}

impl MarketingCardFlow {
    pub fn new(provider: Arc<dyn GenerativeProvider>) -> Self {
        Self {
            provider,
            schema: GenerationResult::output_schema(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one generation. The provider is called exactly once; its output
    /// is only returned after it parses and validates against the schema.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let instruction = marketing_card_prompt(request);

        tracing::info!(
            provider = self.provider.name(),
            category = %request.category,
            "🪄 Generating marketing card for '{}'",
            request.product_name
        );

        let raw = self.provider.generate(&instruction, &self.schema).await?;
        let result = parse_output(&raw, &self.schema)?;

        tracing::info!(
            "✅ Generated card '{}' with {} tags",
            result.title,
            result.tags.len()
        );
        Ok(result)
    }
}

/// Reject blank fields before anything is sent upstream.
pub fn validate_request(
    product_name: Option<&str>,
    category: Option<&str>,
) -> Result<GenerationRequest, ValidationError> {
    fn present(field: Option<&str>) -> Option<&str> {
        field.filter(|value| !value.trim().is_empty())
    }

    match (present(product_name), present(category)) {
        (Some(product_name), Some(category)) => Ok(GenerationRequest::new(product_name, category)),
        (product_name, category) => {
            let mut missing = Vec::new();
            if product_name.is_none() {
                missing.push("productName");
            }
            if category.is_none() {
                missing.push("category");
            }
            Err(ValidationError { missing })
        }
    }
}

/// Parse raw model text into a result, tolerating a Markdown code fence
/// around the JSON but nothing else.
pub fn parse_output(raw: &str, schema: &Schema) -> Result<GenerationResult, GenerationError> {
    let json_str = strip_code_fence(raw);
    let value: Value = serde_json::from_str(json_str).map_err(GenerationError::MalformedOutput)?;
    schema
        .validate(&value)
        .map_err(GenerationError::SchemaMismatch)?;
    serde_json::from_value(value).map_err(GenerationError::MalformedOutput)
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubProvider {
        output: Result<String, String>,
        calls: AtomicUsize,
        last_instruction: Mutex<Option<String>>,
    }

    impl StubProvider {
        fn returning(output: &str) -> Arc<Self> {
            Arc::new(Self {
                output: Ok(output.to_string()),
                calls: AtomicUsize::new(0),
                last_instruction: Mutex::new(None),
            })
        }

        fn failing(body: &str) -> Arc<Self> {
            Arc::new(Self {
                output: Err(body.to_string()),
                calls: AtomicUsize::new(0),
                last_instruction: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl GenerativeProvider for StubProvider {
        async fn generate(&self, instruction: &str, schema: &Schema) -> Result<String, ProviderError> {
            assert_eq!(schema, &GenerationResult::output_schema());
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
            self.output.clone().map_err(|body| ProviderError::Api { status: 503, body })
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    const WATCH_CARD: &str = r#"{"title": "Track Your Best Self", "description": "Your health, on your wrist.", "tags": ["fitness","smart","wearable","health","watch"]}"#;

    #[tokio::test]
    async fn test_generate_passes_result_through() {
        let provider = StubProvider::returning(WATCH_CARD);
        let flow = MarketingCardFlow::new(provider.clone());

        let result = flow
            .generate(&GenerationRequest::new("Smart Fitness Watch", "Wearable Electronics"))
            .await
            .unwrap();

        assert_eq!(result.title, "Track Your Best Self");
        assert_eq!(result.description, "Your health, on your wrist.");
        assert_eq!(result.tags, vec!["fitness", "smart", "wearable", "health", "watch"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        let instruction = provider.last_instruction.lock().unwrap().clone().unwrap();
        assert!(instruction.contains("Smart Fitness Watch"));
        assert!(instruction.contains("Wearable Electronics"));
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_generation_error() {
        let flow = MarketingCardFlow::new(StubProvider::failing("quota exceeded"));
        let err = flow
            .generate(&GenerationRequest::new("Mug", "Kitchenware"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Provider(ProviderError::Api { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_non_conforming_output_is_rejected() {
        let flow = MarketingCardFlow::new(StubProvider::returning(
            r#"{"title": "Mug", "description": "A mug.", "tags": "mug, cup"}"#,
        ));
        let err = flow
            .generate(&GenerationRequest::new("Mug", "Kitchenware"))
            .await
            .unwrap_err();
        match err {
            GenerationError::SchemaMismatch(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].path, "$.tags");
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prose_output_is_rejected() {
        let flow = MarketingCardFlow::new(StubProvider::returning("Here is your card: Mug!"));
        let err = flow
            .generate(&GenerationRequest::new("Mug", "Kitchenware"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[test]
    fn test_parse_output_accepts_fenced_json() {
        let raw = format!("```json\n{}\n```", WATCH_CARD);
        let result = parse_output(&raw, &GenerationResult::output_schema()).unwrap();
        assert_eq!(result.tags.len(), 5);
    }

    #[test]
    fn test_parse_output_accepts_bare_fence() {
        let raw = format!("```\n{}```", WATCH_CARD);
        assert!(parse_output(&raw, &GenerationResult::output_schema()).is_ok());
    }

    #[test]
    fn test_validate_request() {
        let request = validate_request(Some("Smart Fitness Watch"), Some("Wearable Electronics")).unwrap();
        assert_eq!(request, GenerationRequest::new("Smart Fitness Watch", "Wearable Electronics"));

        let err = validate_request(None, Some("Books")).unwrap_err();
        assert_eq!(err.missing, vec!["productName"]);

        let err = validate_request(Some("  "), Some("")).unwrap_err();
        assert_eq!(err.missing, vec!["productName", "category"]);
    }

    #[test]
    fn test_validate_request_keeps_borrowed_values() {
        let body = String::from("Desk Lamp");
        let category = String::from("Furniture");
        let request = validate_request(Some(body.as_str()), Some(category.as_str())).unwrap();
        assert_eq!(request.product_name, "Desk Lamp");
        assert_eq!(request.category, "Furniture");

        let err = validate_request(Some(body.as_str()), Some("\t\n")).unwrap_err();
        assert_eq!(err.missing, vec!["category"]);
    }
}
