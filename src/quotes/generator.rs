//! Model-backed quote generation

use async_trait::async_trait;
use futures::TryStreamExt;
use std::sync::Arc;
use tracing::debug;

use super::error::QuoteError;
use super::model::GeneratedQuote;
use crate::chat::tokens::stream_tokens;
use crate::llm::{GenerateRequest, GenerationConfig, LlmProvider, Message};

pub const QUOTE_PROMPT: &str = "Dear Sir/Madam, Please return random quote. \
Respond in JSON format only by providing object with fields author and quote. \
Do not add anything else except json to response! Thanks.";

#[async_trait]
pub trait QuoteGenerator: Send + Sync {
    async fn generate(&self) -> Result<GeneratedQuote, QuoteError>;
}

/// Asks the language model for a quote as a JSON object
pub struct LlmQuoteGenerator {
    provider: Arc<dyn LlmProvider>,
    config: GenerationConfig,
}

impl LlmQuoteGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl QuoteGenerator for LlmQuoteGenerator {
    async fn generate(&self) -> Result<GeneratedQuote, QuoteError> {
        let request = GenerateRequest::new(vec![Message::user(QUOTE_PROMPT)], self.config.clone());

        let text: String = stream_tokens(self.provider.as_ref(), request)
            .await?
            .try_collect()
            .await?;

        debug!(chars = text.len(), "Quote reply received");
        parse_generated_quote(&text)
    }
}

/// Pull the outermost `{...}` object out of a model reply and decode it.
///
/// Models like to wrap JSON in prose or code fences, so anything before the
/// first `{` and after the last `}` is ignored.
pub fn parse_generated_quote(text: &str) -> Result<GeneratedQuote, QuoteError> {
    let start = text.find('{');
    let end = text.rfind('}');

    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => {
            return Err(QuoteError::Malformed(format!(
                "No JSON object in reply: {:?}",
                text
            )))
        }
    };

    serde_json::from_str(json)
        .map_err(|e| QuoteError::Malformed(format!("Invalid quote JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::test_support::{Script, ScriptedProvider};

    #[test]
    fn test_parse_plain_json() {
        let quote =
            parse_generated_quote(r#"{"author": "HAL 9000", "quote": "Daisy, Daisy"}"#).unwrap();
        assert_eq!(quote.author, "HAL 9000");
        assert_eq!(quote.quote, "Daisy, Daisy");
    }

    #[test]
    fn test_parse_ignores_surrounding_text() {
        let reply = "Here you go:\n```json\n{\"author\": \"Seneca\", \"quote\": \"Luck is what happens when preparation meets opportunity.\"}\n```";
        let quote = parse_generated_quote(reply).unwrap();
        assert_eq!(quote.author, "Seneca");
    }

    #[test]
    fn test_parse_rejects_missing_or_incomplete_json() {
        assert!(matches!(
            parse_generated_quote("I cannot do that, Dave."),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_generated_quote("} backwards {"),
            Err(QuoteError::Malformed(_))
        ));
        assert!(matches!(
            parse_generated_quote(r#"{"author": "nobody"}"#),
            Err(QuoteError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_joins_tokens() {
        let provider = ScriptedProvider::new(vec![Script::Reply(vec![
            "{\"author\": \"Ar",
            "thur C. Clarke\", \"quote\": ",
            "\"The truth, as always, will be far stranger.\"}",
        ])]);
        let generator = LlmQuoteGenerator::new(provider.clone(), GenerationConfig::default());

        let quote = generator.generate().await.unwrap();
        assert_eq!(quote.author, "Arthur C. Clarke");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].text, QUOTE_PROMPT);
        assert!(requests[0].system.is_none());
    }

    #[tokio::test]
    async fn test_generate_propagates_model_failures() {
        let provider = ScriptedProvider::new(vec![Script::Refuse, Script::FailAfter(vec!["{"])]);
        let generator = LlmQuoteGenerator::new(provider, GenerationConfig::default());

        assert!(matches!(generator.generate().await, Err(QuoteError::Llm(_))));
        assert!(matches!(generator.generate().await, Err(QuoteError::Llm(_))));
    }
}
