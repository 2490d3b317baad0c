pub mod analysis;
pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod storage;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analysis::{Analyzer, CannedAnalyzer};
use crate::config::Config;
use crate::metrics::{Metrics, SharedMetrics};
use crate::storage::MediaStorage;

pub struct AppState {
    pub config: Config,
    pub media: MediaStorage,
    pub analyzer: Arc<dyn Analyzer>,
    pub metrics: SharedMetrics,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let media = MediaStorage::from_config(&config.storage);
        let analyzer: Arc<dyn Analyzer> = Arc::new(CannedAnalyzer::new(media.clone()));
        let metrics = Arc::new(Metrics::new()?);

        Ok(Self {
            config,
            media,
            analyzer,
            metrics,
        })
    }
}

/// Full application: routes plus request tracing and CORS for browser clients.
pub fn build_app(state: Arc<AppState>) -> Router {
    api::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
