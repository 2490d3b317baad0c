use axum::{
    extract::{FromRequest, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::models::{
    AnalysisPayload, ChatAnalysisRequest, ChatAnalysisResponse, HealthResponse,
    MediaUploadRequest, MediaUploadResponse, UploadedMediaPayload,
};
use crate::api::validation::Validate;
use crate::auth::Caller;
use crate::error::{ApiError, Result};
use crate::AppState;

/// JSON body extractor whose rejections become failure envelopes.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    ApiJson(request): ApiJson<MediaUploadRequest>,
) -> Result<Json<MediaUploadResponse>> {
    request.validate().inspect_err(|e| {
        tracing::warn!(customer_id = request.customer_id, "Rejected media upload: {}", e)
    })?;

    let uploaded_media = state.media.register(&request);

    state
        .metrics
        .media_items_registered
        .inc_by(uploaded_media.len() as u64);

    tracing::info!(
        customer_id = request.customer_id,
        session_id = %request.session_id,
        count = uploaded_media.len(),
        "Registered media upload batch"
    );

    Ok(Json(MediaUploadResponse::success(UploadedMediaPayload {
        uploaded_media,
    })))
}

pub async fn analyze_chat(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    ApiJson(request): ApiJson<ChatAnalysisRequest>,
) -> Result<Json<ChatAnalysisResponse>> {
    request.validate().inspect_err(|e| {
        tracing::warn!(customer_id = request.customer_id, "Rejected chat analysis: {}", e)
    })?;

    tracing::debug!(
        customer_id = request.customer_id,
        session_id = %request.session_id,
        medias = request.medias.len(),
        "Analyzing chat message"
    );

    let body = state.analyzer.analyze(&request).await?;
    state.metrics.chat_analyses.inc();

    Ok(Json(ChatAnalysisResponse::success(AnalysisPayload {
        body: Some(body),
    })))
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<Response> {
    let text = state
        .metrics
        .encode()
        .map_err(|e| ApiError::Internal(format!("Failed to encode metrics: {}", e)))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    )
        .into_response())
}
