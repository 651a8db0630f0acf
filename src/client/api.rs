use async_trait::async_trait;
use reqwest::Client;

use crate::error::ClientRequestError;
use crate::types::{ErrorBody, GenerationRequest, GenerationResult, HealthResponse};

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Anything that can turn a request into a card for the client session.
#[async_trait]
pub trait CardService: Send + Sync {
    async fn generate_marketing_card(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ClientRequestError>;
}

/// Talks to the generation endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCardService {
    client: Client,
    base_url: String,
}

impl HttpCardService {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let base_url = std::env::var("CARDCRAFT_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientRequestError> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl CardService for HttpCardService {
    async fn generate_marketing_card(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ClientRequestError> {
        let response = self
            .client
            .post(self.endpoint("generate-marketing-card"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientRequestError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .map(|error_body| error_body.error);
        return Err(ClientRequestError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
