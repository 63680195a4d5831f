use thiserror::Error;

use crate::llm::LlmError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Quote generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Model returned an unusable quote: {0}")]
    Malformed(String),

    #[error("Quote store failed: {0}")]
    Store(#[from] StoreError),
}

impl QuoteError {
    /// True when the failure came from the model rather than the store
    pub fn is_upstream(&self) -> bool {
        matches!(self, QuoteError::Llm(_) | QuoteError::Malformed(_))
    }
}
