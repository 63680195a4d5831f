//! Mapping between provider-neutral types and Claude wire types

use crate::llm::core::types::{FinishReason, GenerateRequest, Message, StreamEvent, UsageMetadata};

use super::types::{
    ClaudeContentDelta, ClaudeMessage, ClaudeStreamEvent, StreamRawPredictRequest,
    ANTHROPIC_VERSION,
};

pub fn to_claude_request(request: GenerateRequest) -> StreamRawPredictRequest {
    StreamRawPredictRequest {
        anthropic_version: ANTHROPIC_VERSION.to_string(),
        max_tokens: request.config.max_tokens,
        messages: request.messages.into_iter().map(to_claude_message).collect(),
        system: request.system,
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop_sequences: request.config.stop_sequences,
        stream: true,
    }
}

fn to_claude_message(message: Message) -> ClaudeMessage {
    ClaudeMessage {
        role: message.role.as_str().to_string(),
        content: message.text,
    }
}

/// Convert one Claude event into at most one neutral event.
///
/// `usage` accumulates across the stream: input tokens arrive with
/// `message_start`, output tokens with each `message_delta`.
pub fn from_claude_event(
    event: ClaudeStreamEvent,
    usage: &mut UsageMetadata,
) -> Option<StreamEvent> {
    match event {
        ClaudeStreamEvent::MessageStart { message } => {
            *usage = UsageMetadata::new(message.usage.input_tokens, message.usage.output_tokens);
            Some(StreamEvent::MessageStart { id: message.id })
        }
        ClaudeStreamEvent::ContentBlockDelta {
            delta: ClaudeContentDelta::TextDelta { text },
            ..
        } => Some(StreamEvent::TextDelta { text }),
        ClaudeStreamEvent::MessageDelta {
            delta,
            usage: delta_usage,
        } => {
            if let Some(delta_usage) = delta_usage {
                *usage = UsageMetadata::new(usage.input_tokens, delta_usage.output_tokens);
            }
            delta.stop_reason.map(|reason| StreamEvent::MessageEnd {
                finish_reason: FinishReason::from_stop_reason(&reason),
                usage: *usage,
            })
        }
        ClaudeStreamEvent::Error { error } => Some(StreamEvent::Error {
            error: format!("{}: {}", error.error_type, error.message),
        }),
        ClaudeStreamEvent::ContentBlockDelta { .. }
        | ClaudeStreamEvent::ContentBlockStart { .. }
        | ClaudeStreamEvent::ContentBlockStop { .. }
        | ClaudeStreamEvent::MessageStop
        | ClaudeStreamEvent::Ping => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{
        ClaudeErrorData, ClaudeMessageData, ClaudeMessageDeltaData, ClaudeUsage,
    };
    use super::*;
    use crate::llm::core::config::GenerationConfig;

    #[test]
    fn test_to_claude_request() {
        let request = GenerateRequest::new(
            vec![Message::user("hello"), Message::assistant("Good afternoon, Dave.")],
            GenerationConfig::new(300).with_temperature(0.4),
        )
        .with_system("Please pretend to be evil robot called HAL 9000.");

        let claude = to_claude_request(request);
        assert_eq!(claude.anthropic_version, "vertex-2023-10-16");
        assert_eq!(claude.max_tokens, 300);
        assert_eq!(claude.temperature, Some(0.4));
        assert!(claude.stream);
        assert_eq!(claude.messages.len(), 2);
        assert_eq!(claude.messages[0].role, "user");
        assert_eq!(claude.messages[1].role, "assistant");
        assert_eq!(claude.messages[1].content, "Good afternoon, Dave.");
        assert!(claude.system.unwrap().contains("HAL 9000"));
    }

    #[test]
    fn test_text_delta_maps_to_text_event() {
        let mut usage = UsageMetadata::default();
        let event = from_claude_event(
            ClaudeStreamEvent::ContentBlockDelta {
                index: 0,
                delta: ClaudeContentDelta::TextDelta {
                    text: "I am".to_string(),
                },
            },
            &mut usage,
        );
        assert_eq!(
            event,
            Some(StreamEvent::TextDelta {
                text: "I am".to_string()
            })
        );
    }

    #[test]
    fn test_usage_accumulates_into_message_end() {
        let mut usage = UsageMetadata::default();

        from_claude_event(
            ClaudeStreamEvent::MessageStart {
                message: ClaudeMessageData {
                    id: "msg_1".to_string(),
                    usage: ClaudeUsage {
                        input_tokens: 12,
                        output_tokens: 1,
                    },
                },
            },
            &mut usage,
        );

        let end = from_claude_event(
            ClaudeStreamEvent::MessageDelta {
                delta: ClaudeMessageDeltaData {
                    stop_reason: Some("end_turn".to_string()),
                },
                usage: Some(ClaudeUsage {
                    input_tokens: 0,
                    output_tokens: 30,
                }),
            },
            &mut usage,
        );

        assert_eq!(
            end,
            Some(StreamEvent::MessageEnd {
                finish_reason: FinishReason::EndTurn,
                usage: UsageMetadata::new(12, 30),
            })
        );
    }

    #[test]
    fn test_bookkeeping_events_are_dropped() {
        let mut usage = UsageMetadata::default();
        assert!(from_claude_event(ClaudeStreamEvent::Ping, &mut usage).is_none());
        assert!(from_claude_event(ClaudeStreamEvent::MessageStop, &mut usage).is_none());
        assert!(
            from_claude_event(ClaudeStreamEvent::ContentBlockStop { index: 0 }, &mut usage)
                .is_none()
        );
    }

    #[test]
    fn test_error_event_is_forwarded() {
        let mut usage = UsageMetadata::default();
        let event = from_claude_event(
            ClaudeStreamEvent::Error {
                error: ClaudeErrorData {
                    error_type: "overloaded_error".to_string(),
                    message: "Overloaded".to_string(),
                },
            },
            &mut usage,
        );
        assert_eq!(
            event,
            Some(StreamEvent::Error {
                error: "overloaded_error: Overloaded".to_string()
            })
        );
    }
}
