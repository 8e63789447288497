use std::sync::Arc;

use roster_engine::api::{AppState, create_router};
use roster_engine::config::ConfigLoader;
use roster_engine::store::MemoryStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_engine=info".into()),
        )
        .init();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_address = config.engine().server.bind_address.clone();
    tracing::info!(config_dir = %config_dir, "Configuration loaded");

    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("roster-engine listening on {bind_address}");
    axum::serve(listener, app).await?;

    Ok(())
}
