//! Claude client implementation

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use std::str::FromStr;
use std::time::Duration;

use crate::llm::auth::AuthenticationManager;
use crate::llm::core::{
    error::LlmError,
    provider::{EventStream, LlmProvider},
    types::{GenerateRequest, UsageMetadata},
};

use super::mapper::{from_claude_event, to_claude_request};
use super::sse::parse_sse_stream;

/// Claude model identifiers for Vertex AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeModel {
    Sonnet45,
    Haiku45,
}

impl ClaudeModel {
    /// Model identifier string for Vertex AI
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaudeModel::Sonnet45 => "claude-sonnet-4-5@20250929",
            ClaudeModel::Haiku45 => "claude-haiku-4-5@20251001",
        }
    }
}

impl FromStr for ClaudeModel {
    type Err = LlmError;

    /// Accepts the short family name or the full Vertex identifier
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "claude-sonnet-4-5" | "claude-sonnet-4-5@20250929" => Ok(ClaudeModel::Sonnet45),
            "claude-haiku-4-5" | "claude-haiku-4-5@20251001" => Ok(ClaudeModel::Haiku45),
            other => Err(LlmError::InvalidRequest(format!("Unknown model: {}", other))),
        }
    }
}

/// Client for Claude models on Vertex AI
pub struct ClaudeClient {
    http_client: Client,
    auth_manager: AuthenticationManager,
    project_id: String,
    location: String,
    model: ClaudeModel,
}

impl ClaudeClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or no ADC
    /// credentials are available.
    pub async fn new(
        project_id: String,
        location: String,
        model: ClaudeModel,
    ) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        let auth_manager = AuthenticationManager::new().await?;

        Ok(Self {
            http_client,
            auth_manager,
            project_id,
            location,
            model,
        })
    }

    fn endpoint_url(&self) -> String {
        endpoint_url(&self.project_id, &self.location, self.model)
    }
}

fn endpoint_url(project_id: &str, location: &str, model: ClaudeModel) -> String {
    format!(
        "https://{}-aiplatform.googleapis.com/v1/projects/{}/locations/{}/publishers/anthropic/models/{}:streamRawPredict",
        location,
        project_id,
        location,
        model.as_str()
    )
}

fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl LlmProvider for ClaudeClient {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        let claude_request = to_claude_request(request);
        let token = self.auth_manager.bearer_token().await?;

        tracing::debug!(model = self.model.as_str(), "Sending streamRawPredict request");

        let response = self
            .http_client
            .post(self.endpoint_url())
            .bearer_auth(token)
            .json(&claude_request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded {
                retry_after: retry_after(&response),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let sse_stream = parse_sse_stream(Box::pin(response.bytes_stream()));

        let mut usage = UsageMetadata::default();
        let event_stream = sse_stream.filter_map(move |result| {
            let mapped = match result {
                Ok(claude_event) => from_claude_event(claude_event, &mut usage).map(Ok),
                Err(e) => Some(Err(e)),
            };
            futures::future::ready(mapped)
        });

        Ok(Box::pin(event_stream))
    }
}
