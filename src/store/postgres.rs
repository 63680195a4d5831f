use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::quotes::Quote;
use crate::store::connection::DatabaseConfig;
use crate::store::error::Result;
use crate::store::repository::QuoteRepository;

const CREATE_QUOTES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS quotes (
    id         BIGSERIAL PRIMARY KEY,
    author     TEXT NOT NULL,
    quote      TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const INSERT_QUOTE: &str =
    "INSERT INTO quotes (author, quote) VALUES ($1, $2) RETURNING id, author, quote, created_at";

const SELECT_ALL_QUOTES: &str = "SELECT id, author, quote, created_at FROM quotes ORDER BY id";

/// Quote store backed by a Postgres `quotes` table
#[derive(Clone)]
pub struct PostgresQuoteRepository {
    pool: Pool,
}

impl PostgresQuoteRepository {
    /// Build the pool and check that the database answers
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = config.build_pool()?;
        let _conn = pool.get().await?;
        Ok(Self { pool })
    }

    /// Create the `quotes` table if it is missing
    pub async fn ensure_schema(&self) -> Result<()> {
        let conn = self.pool.get().await?;
        conn.batch_execute(CREATE_QUOTES_TABLE).await?;
        Ok(())
    }
}

fn row_to_quote(row: &Row) -> Result<Quote> {
    Ok(Quote {
        id: row.try_get("id")?,
        author: row.try_get("author")?,
        quote: row.try_get("quote")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn insert(&self, author: &str, quote: &str) -> Result<Quote> {
        let conn = self.pool.get().await?;
        let row = conn.query_one(INSERT_QUOTE, &[&author, &quote]).await?;
        row_to_quote(&row)
    }

    async fn list_all(&self) -> Result<Vec<Quote>> {
        let conn = self.pool.get().await?;
        let rows = conn.query(SELECT_ALL_QUOTES, &[]).await?;
        rows.iter().map(row_to_quote).collect()
    }
}
