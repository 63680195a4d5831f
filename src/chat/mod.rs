//! Streaming chat: fragments, the token-relay responder and per-connection sessions

pub mod fragment;
pub mod memory;
pub mod responder;
pub mod session;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_support;

pub use fragment::Fragment;
pub use memory::ChatMemory;
pub use responder::{ChatSettings, Responder};
pub use session::{ChatSession, Inbound, SessionState, Trigger};
