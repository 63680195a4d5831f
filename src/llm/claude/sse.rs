//! Server-Sent Events (SSE) parser for Claude responses

use bytes::Bytes;
use async_stream::stream;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;
use tracing::warn;

use crate::llm::core::error::LlmError;

use super::types::ClaudeStreamEvent;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Parse a stream of bytes as Claude SSE events
///
/// Claude frames every event as
/// ```text
/// event: content_block_delta
/// data: {"type":"content_block_delta",...}
///
/// ```
/// Lines may end in `\n`, `\r\n` or `\r`. Bytes are buffered until a blank
/// line closes an event, so an event (or a multi-byte character) split across
/// network chunks is decoded only once it is complete. Events are yielded in
/// arrival order. An unterminated event at the end of the body is discarded.
pub fn parse_sse_stream(
    mut byte_stream: ByteStream,
) -> Pin<Box<dyn Stream<Item = Result<ClaudeStreamEvent, LlmError>> + Send>> {
    Box::pin(stream! {
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield Err(LlmError::StreamError(e.to_string()));
                    continue;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some((event_end, consumed)) = find_event_boundary(&buffer) {
                let raw: Vec<u8> = buffer.drain(..consumed).collect();
                match std::str::from_utf8(&raw[..event_end]) {
                    Ok(text) => {
                        if let Some(event) = parse_event(text) {
                            yield event;
                        }
                    }
                    Err(e) => {
                        yield Err(LlmError::StreamError(format!("Invalid UTF-8 in stream: {}", e)));
                    }
                }
            }
        }

        if buffer.iter().any(|b| !b.is_ascii_whitespace()) {
            warn!(bytes = buffer.len(), "SSE body ended inside an unterminated event");
        }
    })
}

/// Find the first blank line. Returns the length of the event before it and
/// the number of bytes up to and including it.
fn find_event_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    let mut i = 0;
    let mut line_start = 0;

    while i < buffer.len() {
        let terminator = match buffer[i] {
            b'\n' => 1,
            b'\r' => match buffer.get(i + 1) {
                Some(b'\n') => 2,
                Some(_) => 1,
                // a CR ending the buffer may be half of a CRLF; only a blank line is certain
                None if i == line_start => 1,
                None => return None,
            },
            _ => {
                i += 1;
                continue;
            }
        };

        if i == line_start {
            return Some((line_start, i + terminator));
        }
        i += terminator;
        line_start = i;
    }

    None
}

/// Parse a single SSE event from its text representation
fn parse_event(event_text: &str) -> Option<Result<ClaudeStreamEvent, LlmError>> {
    let mut event_type: Option<&str> = None;
    let mut data: Option<&str> = None;

    for line in event_text.split(['\r', '\n']) {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("event:") {
            event_type = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            data = Some(value.trim());
        }
    }

    let data = data.filter(|d| !d.is_empty())?;

    match serde_json::from_str::<ClaudeStreamEvent>(data) {
        Ok(event) => Some(Ok(event)),
        Err(e) => Some(Err(LlmError::SerializationError(format!(
            "Failed to parse Claude SSE event (type: {:?}): {}. Data: {}",
            event_type, e, data
        )))),
    }
}
