//! Application configuration read from the environment

use config::{Config, Environment};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::chat::responder::DEFAULT_MEMORY_WINDOW;
use crate::llm::{ClaudeModel, GenerationConfig};
use crate::store::connection::DEFAULT_MAX_POOL_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

const VARIABLES: &[&str] = &[
    "BIND_ADDR",
    "DATABASE_URL",
    "DB_MAX_POOL_SIZE",
    "GCP_PROJECT_ID",
    "GCP_LOCATION",
    "LLM_MODEL",
    "LLM_MAX_TOKENS",
    "LLM_TEMPERATURE",
    "LLM_TOP_P",
    "LLM_STOP_SEQUENCES",
    "CHAT_MEMORY_WINDOW",
    "STATIC_DIR",
];

/// Environment variables as read, before validation
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "default_bind_addr")]
    bind_addr: SocketAddr,
    #[serde(default, deserialize_with = "blank_as_none")]
    database_url: Option<String>,
    #[serde(default = "default_db_max_pool_size")]
    db_max_pool_size: usize,
    gcp_project_id: String,
    #[serde(default = "default_gcp_location")]
    gcp_location: String,
    #[serde(default = "default_llm_model")]
    llm_model: String,
    #[serde(default = "default_llm_max_tokens")]
    llm_max_tokens: u32,
    #[serde(default)]
    llm_temperature: Option<f32>,
    #[serde(default)]
    llm_top_p: Option<f32>,
    /// Comma separated
    #[serde(default)]
    llm_stop_sequences: Option<Vec<String>>,
    #[serde(default = "default_chat_memory_window")]
    chat_memory_window: usize,
    #[serde(default = "default_static_dir")]
    static_dir: PathBuf,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3030))
}

fn default_db_max_pool_size() -> usize {
    DEFAULT_MAX_POOL_SIZE
}

fn default_gcp_location() -> String {
    "us-central1".to_string()
}

fn default_llm_model() -> String {
    "claude-haiku-4-5".to_string()
}

fn default_llm_max_tokens() -> u32 {
    1024
}

fn default_chat_memory_window() -> usize {
    DEFAULT_MEMORY_WINDOW
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Unset means quotes are kept in memory
    pub database_url: Option<String>,
    pub db_max_pool_size: usize,
    pub gcp_project_id: String,
    pub gcp_location: String,
    pub model: ClaudeModel,
    pub generation: GenerationConfig,
    pub memory_window: usize,
    pub static_dir: PathBuf,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        // Unrelated variables are left out; arbitrary names are not valid config keys.
        let vars = std::env::vars()
            .filter(|(name, _)| VARIABLES.contains(&name.as_str()))
            .collect();
        Self::from_vars(vars)
    }

    /// Read the configuration from the given variables instead of the
    /// process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let environment = Environment::default()
            .source(Some(vars.into_iter().collect()))
            .ignore_empty(true)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("llm_stop_sequences");

        let raw: RawSettings = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Self::try_from(raw)
    }
}

impl TryFrom<RawSettings> for AppConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        let model = raw
            .llm_model
            .parse::<ClaudeModel>()
            .map_err(|e| ConfigError::Invalid {
                name: "LLM_MODEL",
                reason: e.to_string(),
            })?;

        let mut generation = GenerationConfig::new(raw.llm_max_tokens);
        if let Some(temperature) = raw.llm_temperature {
            generation = generation.with_temperature(temperature);
        }
        if let Some(top_p) = raw.llm_top_p {
            generation = generation.with_top_p(top_p);
        }
        if let Some(stop_sequences) = raw.llm_stop_sequences {
            let stop_sequences: Vec<String> = stop_sequences
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !stop_sequences.is_empty() {
                generation = generation.with_stop_sequences(stop_sequences);
            }
        }

        Ok(Self {
            bind_addr: raw.bind_addr,
            database_url: raw.database_url,
            db_max_pool_size: raw.db_max_pool_size,
            gcp_project_id: raw.gcp_project_id,
            gcp_location: raw.gcp_location,
            model,
            generation,
            memory_window: raw.chat_memory_window,
            static_dir: raw.static_dir,
        })
    }
}
