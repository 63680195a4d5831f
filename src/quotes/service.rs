use std::sync::Arc;
use tracing::info;

use super::error::QuoteError;
use super::generator::QuoteGenerator;
use super::model::Quote;
use crate::store::QuoteRepository;

/// Generates quotes and keeps every one it hands out
pub struct QuoteService {
    generator: Arc<dyn QuoteGenerator>,
    repository: Arc<dyn QuoteRepository>,
}

impl QuoteService {
    pub fn new(generator: Arc<dyn QuoteGenerator>, repository: Arc<dyn QuoteRepository>) -> Self {
        Self {
            generator,
            repository,
        }
    }

    /// Ask the model for a fresh quote and store it
    pub async fn random_quote(&self) -> Result<Quote, QuoteError> {
        let generated = self.generator.generate().await?;
        let quote = self
            .repository
            .insert(&generated.author, &generated.quote)
            .await?;

        info!(id = quote.id, author = %quote.author, "Stored generated quote");
        Ok(quote)
    }

    pub async fn all_quotes(&self) -> Result<Vec<Quote>, QuoteError> {
        Ok(self.repository.list_all().await?)
    }
}
