use std::sync::Arc;
use tracing::info;

use hal9000::chat::ChatSettings;
use hal9000::config::AppConfig;
use hal9000::llm::{create_provider, LlmProvider};
use hal9000::quotes::{LlmQuoteGenerator, QuoteService};
use hal9000::routes::{configure_routes, AppState, ChatContext};
use hal9000::store::{
    DatabaseConfig, InMemoryQuoteRepository, PostgresQuoteRepository, QuoteRepository,
};
use hal9000::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info");
    let config = AppConfig::from_env()?;

    let provider: Arc<dyn LlmProvider> = Arc::from(
        create_provider(
            config.model,
            config.gcp_project_id.clone(),
            config.gcp_location.clone(),
        )
        .await?,
    );

    let repository: Arc<dyn QuoteRepository> = match &config.database_url {
        Some(url) => {
            let db_config =
                DatabaseConfig::from_connection_string(url)?.with_max_pool_size(config.db_max_pool_size);
            let repo = PostgresQuoteRepository::connect(&db_config).await?;
            repo.ensure_schema().await?;
            info!(database = ?db_config.database(), "Using Postgres quote store");
            Arc::new(repo)
        }
        None => {
            info!("DATABASE_URL not set, keeping quotes in memory");
            Arc::new(InMemoryQuoteRepository::new())
        }
    };

    let generator = LlmQuoteGenerator::new(provider.clone(), config.generation.clone());
    let settings = ChatSettings {
        generation: config.generation.clone(),
        memory_window: config.memory_window,
        ..ChatSettings::default()
    };

    let state = AppState {
        quotes: Arc::new(QuoteService::new(Arc::new(generator), repository)),
        chat: ChatContext { provider, settings },
        static_dir: config.static_dir.clone(),
    };

    info!(addr = %config.bind_addr, model = config.model.as_str(), "Starting server");
    warp::serve(configure_routes(state)).run(config.bind_addr).await;

    Ok(())
}
