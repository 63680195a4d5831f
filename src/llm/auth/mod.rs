//! Google Cloud credentials for Vertex AI calls

pub mod adc;

pub use adc::AuthenticationManager;
