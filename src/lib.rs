// HTTP Server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod telemetry;

// Chat streaming and quotes
pub mod chat;
pub mod quotes;

// Quote persistence
pub mod store;

// LLM abstraction layer
pub mod llm;
