//! One chat connection: turn sequencing and cancellation
//!
//! A session runs the greeting turn, then one turn per inbound message.
//! Messages that arrive while a turn is streaming are queued and run in
//! order afterwards, so two turns never interleave on the socket. A close
//! frame, a dead socket or a failed send cancels the running turn.

use futures::sink::{Sink, SinkExt};
use futures::stream::{Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;
use tracing::{debug, info, warn};

use super::responder::Responder;
use crate::models::ChatMessage;

/// Inbound traffic, reduced to what the session cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    /// Client asked to close, or the socket broke
    Close,
    /// Pings, pongs and binary frames
    Ignored,
}

/// What starts a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    ConnectionOpen,
    Message(Option<String>),
}

impl Trigger {
    /// Parse an htmx `ws-send` payload. Anything unreadable counts as an
    /// absent message.
    pub fn from_payload(payload: &str) -> Self {
        match serde_json::from_str::<ChatMessage>(payload) {
            Ok(message) => Trigger::Message(message.message),
            Err(e) => {
                warn!(error = %e, "Unreadable chat payload");
                Trigger::Message(None)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Streaming,
}

/// Messages that can wait behind a running turn. Later ones are dropped.
pub const MAX_QUEUED_MESSAGES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnOutcome {
    Finished,
    Disconnected,
}

pub struct ChatSession {
    responder: Responder,
    state: SessionState,
    pending: VecDeque<Trigger>,
}

impl ChatSession {
    pub fn new(responder: Responder) -> Self {
        Self {
            responder,
            state: SessionState::Idle,
            pending: VecDeque::new(),
        }
    }

    /// Drive the connection until the client goes away
    pub async fn run<S, R, E>(mut self, mut outbound: S, mut inbound: R)
    where
        S: Sink<String, Error = E> + Unpin,
        R: Stream<Item = Inbound> + Unpin,
        E: Display,
    {
        info!("Chat session started");
        self.pending.push_back(Trigger::ConnectionOpen);

        loop {
            let trigger = match self.pending.pop_front() {
                Some(trigger) => trigger,
                None => match inbound.next().await {
                    Some(Inbound::Text(payload)) => Trigger::from_payload(&payload),
                    Some(Inbound::Ignored) => continue,
                    Some(Inbound::Close) | None => break,
                },
            };

            let outcome = self.run_turn(trigger, &mut outbound, &mut inbound).await;
            if outcome == TurnOutcome::Disconnected {
                break;
            }
        }

        info!(queued = self.pending.len(), "Chat session ended");
    }

    async fn run_turn<S, R, E>(
        &mut self,
        trigger: Trigger,
        outbound: &mut S,
        inbound: &mut R,
    ) -> TurnOutcome
    where
        S: Sink<String, Error = E> + Unpin,
        R: Stream<Item = Inbound> + Unpin,
        E: Display,
    {
        let mut fragments = match &trigger {
            Trigger::ConnectionOpen => self.responder.on_connection_open().boxed(),
            Trigger::Message(text) => self.responder.on_message(text.as_deref()).boxed(),
        };
        self.state = SessionState::Streaming;
        debug!(state = ?self.state, trigger = ?trigger, "Turn accepted");

        let outcome = loop {
            tokio::select! {
                next = fragments.next() => match next {
                    Some(fragment) => {
                        if let Err(e) = outbound.send(fragment.render()).await {
                            warn!(error = %e, "Failed to send fragment, closing session");
                            break TurnOutcome::Disconnected;
                        }
                    }
                    None => break TurnOutcome::Finished,
                },
                incoming = inbound.next() => match incoming {
                    Some(Inbound::Text(payload)) => Self::enqueue_into(&mut self.pending, Trigger::from_payload(&payload)),
                    Some(Inbound::Ignored) => {}
                    Some(Inbound::Close) | None => {
                        info!("Client disconnected mid-turn");
                        break TurnOutcome::Disconnected;
                    }
                },
            }
        };

        drop(fragments);
        self.state = SessionState::Idle;
        debug!(state = ?self.state, outcome = ?outcome, "Turn over");
        outcome
    }

    fn enqueue(&mut self, trigger: Trigger) {
        Self::enqueue_into(&mut self.pending, trigger);
    }

    fn enqueue_into(pending: &mut VecDeque<Trigger>, trigger: Trigger) {
        if pending.len() >= MAX_QUEUED_MESSAGES {
            warn!(queued = pending.len(), "Message queue full, dropping message");
            return;
        }
        pending.push_back(trigger);
        debug!(queued = pending.len(), "Message queued behind running turn");
    }
}
