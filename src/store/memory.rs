use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::quotes::Quote;
use crate::store::error::{Result, StoreError};
use crate::store::repository::QuoteRepository;

/// Process-local quote store, used when no database is configured
#[derive(Debug, Default)]
pub struct InMemoryQuoteRepository {
    quotes: Mutex<Vec<Quote>>,
}

impl InMemoryQuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuoteRepository for InMemoryQuoteRepository {
    async fn insert(&self, author: &str, quote: &str) -> Result<Quote> {
        let mut quotes = self
            .quotes
            .lock()
            .map_err(|e| StoreError::DatabaseError(format!("Quote store poisoned: {}", e)))?;

        let stored = Quote {
            id: quotes.len() as i64 + 1,
            author: author.to_string(),
            quote: quote.to_string(),
            created_at: Utc::now(),
        };
        quotes.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Quote>> {
        let quotes = self
            .quotes
            .lock()
            .map_err(|e| StoreError::DatabaseError(format!("Quote store poisoned: {}", e)))?;
        Ok(quotes.clone())
    }
}
