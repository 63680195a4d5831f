//! Scripted model backend for responder and session tests

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::llm::{
    EventStream, FinishReason, GenerateRequest, LlmError, LlmProvider, StreamEvent, UsageMetadata,
};

/// What the provider does for one call
pub enum Script {
    /// Streams the tokens and finishes normally
    Reply(Vec<&'static str>),
    /// Streams the tokens, then fails
    FailAfter(Vec<&'static str>),
    /// The call itself is rejected
    Refuse,
    /// Streams the tokens, then never finishes. The flag flips when the
    /// stream is dropped.
    Stall(Vec<&'static str>, Arc<AtomicBool>),
}

pub struct ScriptedProvider {
    scripts: Mutex<VecDeque<Script>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(scripts: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn deltas(tokens: Vec<&'static str>) -> Vec<Result<StreamEvent, LlmError>> {
    tokens
        .into_iter()
        .map(|t| Ok(StreamEvent::TextDelta { text: t.to_string() }))
        .collect()
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn stream_generate(&self, request: GenerateRequest) -> Result<EventStream, LlmError> {
        self.requests.lock().unwrap().push(request);
        let script = self.scripts.lock().unwrap().pop_front();

        match script {
            Some(Script::Reply(tokens)) => {
                let mut events = deltas(tokens);
                events.push(Ok(StreamEvent::MessageEnd {
                    finish_reason: FinishReason::EndTurn,
                    usage: UsageMetadata::new(1, 1),
                }));
                Ok(Box::pin(stream::iter(events)))
            }
            Some(Script::FailAfter(tokens)) => {
                let mut events = deltas(tokens);
                events.push(Err(LlmError::StreamError("connection reset".to_string())));
                events.push(Ok(StreamEvent::TextDelta {
                    text: "after failure".to_string(),
                }));
                Ok(Box::pin(stream::iter(events)))
            }
            Some(Script::Refuse) => Err(LlmError::HttpError {
                status: 503,
                body: "unavailable".to_string(),
            }),
            Some(Script::Stall(tokens, dropped)) => {
                let guard = DropFlag(dropped);
                let events = stream::iter(deltas(tokens))
                    .chain(stream::pending())
                    .map(move |event| {
                        let _keep = &guard;
                        event
                    });
                Ok(Box::pin(events))
            }
            None => Err(LlmError::StreamError("No more scripted responses".to_string())),
        }
    }
}
