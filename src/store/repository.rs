use async_trait::async_trait;

use crate::quotes::Quote;
use crate::store::error::Result;

/// Storage for generated quotes: create and list, nothing else
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Persist a quote; the store assigns a unique id
    async fn insert(&self, author: &str, quote: &str) -> Result<Quote>;

    /// Every stored quote, oldest first
    async fn list_all(&self) -> Result<Vec<Quote>>;
}
