pub mod handlers;
pub mod models;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::metrics::track_requests;
use crate::AppState;

pub const UPLOAD_PATH: &str = "/api/user/chat/media/upload";
pub const CHAT_PATH: &str = "/api/user/chat";

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route(UPLOAD_PATH, post(handlers::upload_media))
        .route(CHAT_PATH, post(handlers::analyze_chat))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .with_state(state)
}
