// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Analyses by outcome (`answered` or an error kind label)
    pub static ref ANALYSES_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("analyses_total", "Total image analyses by outcome"),
        &["outcome"],
        REGISTRY
    ).expect("analyses_total metric");

    /// Upstream chat completion calls by HTTP status
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total chat completion calls"),
        &["status"],
        REGISTRY
    ).expect("upstream_calls_total metric");

    /// Upstream call latency
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_duration_seconds", "Chat completion call duration")
            .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["status"],
        REGISTRY
    ).expect("upstream_duration_seconds metric");

    /// Image uploads by outcome
    pub static ref UPLOADS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("uploads_total", "Total image uploads by outcome"),
        &["outcome"],
        REGISTRY
    ).expect("uploads_total metric");
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
