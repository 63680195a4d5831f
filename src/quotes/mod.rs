//! Random quotes: ask the model, persist, list

pub mod error;
pub mod generator;
pub mod model;
pub mod service;

pub use error::QuoteError;
pub use generator::{parse_generated_quote, LlmQuoteGenerator, QuoteGenerator};
pub use model::{GeneratedQuote, Quote};
pub use service::QuoteService;
