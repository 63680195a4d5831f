//! LLM client layer
//!
//! A small provider abstraction plus a streaming client for Anthropic Claude
//! models hosted on Google Cloud Vertex AI.

pub mod auth;
pub mod claude;
pub mod core;

pub use self::core::{
    config::GenerationConfig,
    error::LlmError,
    provider::{create_provider, EventStream, LlmProvider},
    types::{FinishReason, GenerateRequest, Message, MessageRole, StreamEvent, UsageMetadata},
};
pub use claude::{ClaudeClient, ClaudeModel};
