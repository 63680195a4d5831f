//! Provider trait for LLM implementations

use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;

use super::{
    error::LlmError,
    types::{GenerateRequest, StreamEvent},
};
use crate::llm::claude::{ClaudeClient, ClaudeModel};

/// Stream of incremental events for one generation
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Main interface that all LLM provider implementations must satisfy
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Stream generate content from the LLM
    ///
    /// Resolves once the backend has accepted the request; the returned
    /// stream then yields events as the model produces them. Dropping the
    /// stream releases the underlying connection.
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError>;
}

/// Create an LLM provider for the given model on Vertex AI
///
/// # Example
///
/// ```rust,no_run
/// use hal9000::llm::{create_provider, ClaudeModel};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = create_provider(
///     ClaudeModel::Haiku45,
///     "my-project".to_string(),
///     "us-central1".to_string(),
/// ).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_provider(
    model: ClaudeModel,
    project_id: String,
    location: String,
) -> Result<Box<dyn LlmProvider>, LlmError> {
    let client = ClaudeClient::new(project_id, location, model).await?;
    Ok(Box::new(client))
}
