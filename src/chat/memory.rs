//! Per-connection conversation memory

use std::collections::VecDeque;

use crate::llm::Message;

/// Sliding window over the most recent messages of one conversation.
///
/// Only completed turns are recorded, as a user/assistant pair, so the
/// window always starts with a user message once it has trimmed.
#[derive(Debug, Clone)]
pub struct ChatMemory {
    window: usize,
    messages: VecDeque<Message>,
}

impl ChatMemory {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            messages: VecDeque::with_capacity(window),
        }
    }

    pub fn record_turn(&mut self, prompt: Message, reply: Message) {
        if self.window < 2 {
            return;
        }
        self.messages.push_back(prompt);
        self.messages.push_back(reply);
        while self.messages.len() > self.window {
            // evict whole turns
            self.messages.pop_front();
            self.messages.pop_front();
        }
    }

    /// History followed by `prompt`, ready to send
    pub fn conversation_with(&self, prompt: Message) -> Vec<Message> {
        let mut messages: Vec<Message> = self.messages.iter().cloned().collect();
        messages.push(prompt);
        messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
