//! Quote persistence
//!
//! A [`QuoteRepository`] is backed either by Postgres through a deadpool
//! connection pool, or by a process-local vector when no database is
//! configured.

pub mod connection;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use connection::DatabaseConfig;
pub use error::{Result, StoreError};
pub use memory::InMemoryQuoteRepository;
pub use postgres::PostgresQuoteRepository;
pub use repository::QuoteRepository;
