// Prometheus metrics
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;
use std::time::Instant;

use crate::error::FailureKind;
use crate::AppState;

pub struct Metrics {
    pub registry: Registry,

    // Request counters
    pub requests_total: IntCounterVec,
    pub requests_duration: HistogramVec,
    pub request_failures: IntCounterVec,

    // Chat counters
    pub media_items_registered: IntCounter,
    pub chat_analyses: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let requests_duration = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            ),
            &["method", "path"],
        )?;
        registry.register(Box::new(requests_duration.clone()))?;

        let request_failures = IntCounterVec::new(
            Opts::new("request_failures_total", "Total failed requests by kind"),
            &["path", "kind"],
        )?;
        registry.register(Box::new(request_failures.clone()))?;

        let media_items_registered = IntCounter::new(
            "media_items_registered_total",
            "Total media items resolved to a storage URL",
        )?;
        registry.register(Box::new(media_items_registered.clone()))?;

        let chat_analyses =
            IntCounter::new("chat_analyses_total", "Total chat analyses returned")?;
        registry.register(Box::new(chat_analyses.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            requests_duration,
            request_failures,
            media_items_registered,
            chat_analyses,
        })
    }

    pub fn gather(&self) -> Vec<prometheus::proto::MetricFamily> {
        self.registry.gather()
    }

    /// Renders all metrics in the prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&self.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// Shared metrics instance
pub type SharedMetrics = Arc<Metrics>;

/// Middleware recording count, latency and failure kind of every routed request.
pub async fn track_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();

    let metrics = &state.metrics;
    metrics
        .requests_total
        .with_label_values(&[method.as_str(), path.as_str(), response.status().as_str()])
        .inc();
    metrics
        .requests_duration
        .with_label_values(&[method.as_str(), path.as_str()])
        .observe(elapsed);

    if let Some(FailureKind(kind)) = response.extensions().get::<FailureKind>() {
        metrics
            .request_failures
            .with_label_values(&[path.as_str(), *kind])
            .inc();
    }

    response
}
