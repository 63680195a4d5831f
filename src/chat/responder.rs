//! Token-relay streaming responder
//!
//! Turns one trigger (connection open or an inbound message) into an ordered
//! stream of [`Fragment`]s:
//!
//! - message: `Open`, `Echo(text)`, `Assistant`, one `Token` per model token, `Close`
//! - connection open: `Open`, `Assistant`, tokens for the greeting prompt, `Close`
//!
//! The streams are lazy generators. The model is only called once the
//! consumer has taken the leading markers, and every token is yielded as soon
//! as it arrives. If the model call or its stream fails, the turn stops right
//! there without a `Close`. Dropping the stream drops the upstream
//! subscription with it.

use async_stream::stream;
use futures::stream::Stream;
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fragment::Fragment;
use super::memory::ChatMemory;
use super::tokens::stream_tokens;
use crate::llm::{GenerateRequest, GenerationConfig, LlmProvider, Message};

pub const DEFAULT_SYSTEM_PROMPT: &str = "Please pretend to be evil robot called HAL 9000.";
pub const DEFAULT_GREETING_PROMPT: &str = "Say hello to me and ask if I need help";
pub const DEFAULT_MEMORY_WINDOW: usize = 10;

/// Prompts and generation settings shared by every chat connection
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub system_prompt: String,
    /// Synthetic prompt for the turn that runs when a client connects
    pub greeting_prompt: String,
    pub generation: GenerationConfig,
    /// Number of past messages sent along with each prompt
    pub memory_window: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            greeting_prompt: DEFAULT_GREETING_PROMPT.to_string(),
            generation: GenerationConfig::default(),
            memory_window: DEFAULT_MEMORY_WINDOW,
        }
    }
}

/// Produces the fragment streams for one connection
pub struct Responder {
    provider: Arc<dyn LlmProvider>,
    settings: ChatSettings,
    memory: ChatMemory,
}

impl Responder {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: ChatSettings) -> Self {
        let memory = ChatMemory::new(settings.memory_window);
        Self {
            provider,
            settings,
            memory,
        }
    }

    pub fn memory(&self) -> &ChatMemory {
        &self.memory
    }

    /// The greeting turn. Never empty: it yields at least `Open` and `Assistant`.
    pub fn on_connection_open(&mut self) -> impl Stream<Item = Fragment> + Send + '_ {
        let greeting = self.settings.greeting_prompt.clone();
        self.turn(Some(greeting), false)
    }

    /// A message turn. Empty or absent text yields nothing and never
    /// reaches the model.
    pub fn on_message(&mut self, text: Option<&str>) -> impl Stream<Item = Fragment> + Send + '_ {
        let prompt = text.filter(|t| !t.is_empty()).map(str::to_owned);
        self.turn(prompt, true)
    }

    fn turn(
        &mut self,
        prompt: Option<String>,
        echo: bool,
    ) -> impl Stream<Item = Fragment> + Send + '_ {
        stream! {
            let prompt = match prompt {
                Some(prompt) => prompt,
                None => {
                    debug!("Ignoring empty message");
                    return;
                }
            };

            info!(greeting = !echo, prompt_chars = prompt.chars().count(), "Turn started");

            yield Fragment::Open;
            if echo {
                yield Fragment::Echo(prompt.clone());
            }
            yield Fragment::Assistant;

            let request = GenerateRequest::new(
                self.memory.conversation_with(Message::user(prompt.clone())),
                self.settings.generation.clone(),
            )
            .with_system(self.settings.system_prompt.clone());

            let mut tokens = match stream_tokens(self.provider.as_ref(), request).await {
                Ok(tokens) => tokens,
                Err(e) => {
                    warn!(error = %e, "Model call failed, ending turn");
                    return;
                }
            };

            let mut reply = String::new();
            let mut count = 0usize;
            while let Some(next) = tokens.next().await {
                match next {
                    Ok(token) => {
                        reply.push_str(&token);
                        count += 1;
                        yield Fragment::Token(token);
                    }
                    Err(e) => {
                        warn!(error = %e, tokens = count, "Model stream failed, ending turn");
                        return;
                    }
                }
            }

            self.memory
                .record_turn(Message::user(prompt), Message::assistant(reply));
            info!(tokens = count, "Turn complete");

            yield Fragment::Close;
        }
    }
}
