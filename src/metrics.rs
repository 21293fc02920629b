//! Prometheus metrics for the `/metrics` scrape endpoint.
//!
//! HTTP-level metrics (request counts, latency) are recorded by
//! [`track_metrics`]. The process collector adds CPU, memory and file
//! descriptor gauges on Linux.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::app_state::AppState;
use crate::error::GatewayError;

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    records_created_total: IntCounter,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("records_created", &self.records_created())
            .finish()
    }
}

impl ApiMetrics {
    /// Creates a fresh registry with all gateway metrics registered.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Metrics`] if a metric cannot be created or
    /// registered.
    pub fn new() -> Result<Self, GatewayError> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("input_gateway_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "input_gateway_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "path"],
        )?;

        let records_created_total = IntCounter::new(
            "input_gateway_records_created_total",
            "Records stored through the submission form",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(records_created_total.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                records_created_total,
            }),
        })
    }

    /// Returns the total request count across all labels.
    #[must_use]
    pub fn requests(&self) -> u64 {
        let mut total = 0u64;
        for mf in &self.inner.http_requests_total.collect() {
            for m in mf.get_metric() {
                total += m.get_counter().get_value() as u64;
            }
        }
        total
    }

    /// Returns how many records have been created.
    #[must_use]
    pub fn records_created(&self) -> u64 {
        self.inner.records_created_total.get()
    }

    /// Counts one stored record.
    pub fn record_created(&self) {
        self.inner.records_created_total.inc();
    }

    /// Records one finished HTTP request.
    pub fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }

    /// Gathers all metrics and encodes them in the Prometheus text format.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Metrics`] if encoding fails.
    pub fn gather_and_encode(&self) -> Result<String, GatewayError> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            GatewayError::Metrics(format!("metrics encoding produced invalid UTF-8: {e}"))
        })
    }
}

/// Middleware that records request count and latency per matched route.
///
/// Installed with `route_layer`, so `MatchedPath` is always present and
/// labels stay bounded to the declared routes.
pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path().to_string(), |p| p.as_str().to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    state.metrics.record_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}
