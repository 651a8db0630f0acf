// lib.rs - CardCraft: AI-generated marketing cards (endpoint + client)
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod gemini_client;
pub mod handlers;
pub mod middleware;
pub mod prompt;
pub mod provider;
pub mod routes;
pub mod schema;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ConfigError, GenerationError, ProviderError, ValidationError};
pub use flow::MarketingCardFlow;
pub use provider::GenerativeProvider;
pub use routes::build_router;
pub use types::{GenerationRequest, GenerationResult};

/// Shared handler state. Built once in `main`; tests build it around a stub provider.
pub struct AppState {
    pub card_flow: MarketingCardFlow,
}

impl AppState {
    pub fn new(card_flow: MarketingCardFlow) -> Self {
        Self { card_flow }
    }
}
