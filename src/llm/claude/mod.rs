//! Claude provider implementation
//!
//! Streams Anthropic Claude completions from Google Cloud Vertex AI.

pub mod client;
pub mod mapper;
pub mod sse;
pub mod types;

pub use client::{ClaudeClient, ClaudeModel};
