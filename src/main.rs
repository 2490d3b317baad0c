use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_media_api::config::Config;
use chat_media_api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_media_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    tracing::info!("Loading configuration from: {}", config_path);

    let config = Config::load(&config_path)?;
    let addr = config.bind_address();

    if config.auth.require_bearer {
        tracing::info!(
            "Bearer authentication enabled ({} configured token(s))",
            config.auth.tokens.len()
        );
    } else {
        tracing::warn!("Bearer authentication disabled; chat endpoints are open");
    }

    let state = Arc::new(AppState::from_config(config)?);
    tracing::info!("Initialized Prometheus metrics");

    let app = build_app(state);

    // Start server
    tracing::info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
