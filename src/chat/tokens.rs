//! Narrow a provider event stream down to the model's text tokens

use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use crate::llm::{EventStream, GenerateRequest, LlmError, LlmProvider, StreamEvent};

/// Ordered tokens for one prompt; ends when the reply is complete
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Start a generation and return its token stream
pub async fn stream_tokens(
    provider: &dyn LlmProvider,
    request: GenerateRequest,
) -> Result<TokenStream, LlmError> {
    let events = provider.stream_generate(request).await?;
    Ok(text_tokens(events))
}

/// Keep text deltas, turn in-band error events into errors, drop the rest
pub fn text_tokens(events: EventStream) -> TokenStream {
    let tokens = events.filter_map(|event| {
        let token = match event {
            Ok(StreamEvent::TextDelta { text }) => Some(Ok(text)),
            Ok(StreamEvent::Error { error }) => Some(Err(LlmError::StreamError(error))),
            Ok(StreamEvent::MessageStart { .. }) | Ok(StreamEvent::MessageEnd { .. }) => None,
            Err(e) => Some(Err(e)),
        };
        futures::future::ready(token)
    });

    Box::pin(tokens)
}
