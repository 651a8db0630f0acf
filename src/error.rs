// Error taxonomy for configuration, the provider call and card generation

use thiserror::Error;

use crate::schema::SchemaViolation;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or GOOGLE_API_KEY) must be set")]
    MissingApiKey,
    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),
}

/// Failure talking to the generative-AI provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Prompt was blocked by the provider: {0}")]
    Blocked(String),
    #[error("Provider returned no text output (finish reason: {0})")]
    EmptyOutput(String),
}

/// Request fields that are missing or empty. Never reaches the model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("productName and category are required")]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// Anything that went wrong between sending the prompt and holding a
/// schema-conforming result.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Model output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),
    #[error("Model output does not match the schema: {}", join_violations(.0))]
    SchemaMismatch(Vec<SchemaViolation>),
}

/// The client could not get a card from the endpoint.
#[derive(Error, Debug)]
pub enum ClientRequestError {
    #[error("Could not reach the card service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Card service responded with HTTP {status}{}", status_suffix(.message))]
    Status { status: u16, message: Option<String> },
    #[error("Card service returned an unexpected body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn status_suffix(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
