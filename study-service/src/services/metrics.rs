//! Prometheus metrics for study-service.
//!
//! HTTP request counts, model provider latency and errors, and the number of
//! live chat sessions.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

static METRICS: OnceLock<Metrics> = OnceLock::new();

struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    provider_latency_seconds: HistogramVec,
    provider_errors_total: IntCounterVec,
    chat_sessions_active: IntGauge,
}

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "path", "status"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
            &["method", "path"],
        )?;

        let provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "genai_provider_latency_seconds",
                "Model provider API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["provider", "operation"],
        )?;

        let provider_errors_total = IntCounterVec::new(
            Opts::new("genai_provider_errors_total", "Total model provider errors"),
            &["provider", "error_type"],
        )?;

        let chat_sessions_active = IntGauge::new(
            "chat_sessions_active",
            "Chat sessions held in memory across all registries",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(provider_latency_seconds.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;
        registry.register(Box::new(chat_sessions_active.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            provider_latency_seconds,
            provider_errors_total,
            chat_sessions_active,
        })
    }
}

/// Initialize all metrics. Safe to call more than once; later calls are no-ops.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    // Losing a race here only discards an unused registry.
    let _ = METRICS.set(Metrics::new()?);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let Some(metrics) = METRICS.get() else {
        tracing::error!("Metrics registry not initialized");
        return "# Metrics registry not initialized\n".to_string();
    };

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .http_requests_total
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
        metrics
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
    }
}

/// Record one model provider call and, if it failed, its error kind.
pub fn record_provider_call(
    provider: &str,
    operation: &str,
    duration_secs: f64,
    error_kind: Option<&str>,
) {
    if let Some(metrics) = METRICS.get() {
        metrics
            .provider_latency_seconds
            .with_label_values(&[provider, operation])
            .observe(duration_secs);
        if let Some(kind) = error_kind {
            metrics
                .provider_errors_total
                .with_label_values(&[provider, kind])
                .inc();
        }
    }
}

/// Count one newly opened chat session.
///
/// The gauge is process-wide and sums every session registry in the process.
pub fn inc_chat_sessions() {
    if let Some(metrics) = METRICS.get() {
        metrics.chat_sessions_active.inc();
    }
}

#[cfg(test)]
pub(crate) fn chat_sessions_active() -> i64 {
    METRICS
        .get()
        .map(|m| m.chat_sessions_active.get())
        .unwrap_or_default()
}
