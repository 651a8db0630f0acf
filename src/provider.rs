use async_trait::async_trait;

use crate::error::ProviderError;
use crate::schema::Schema;

/// A generative model that turns an instruction plus a declared output
/// schema into raw text. Callers must not assume the text conforms.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, instruction: &str, schema: &Schema) -> Result<String, ProviderError>;

    /// Identifier used in logs.
    fn name(&self) -> &str;
}
