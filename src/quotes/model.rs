use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Assigned by the store on insert
    pub id: i64,
    pub author: String,
    pub quote: String,
    pub created_at: DateTime<Utc>,
}

/// A quote as produced by the generator, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedQuote {
    pub author: String,
    pub quote: String,
}
