// Metrics module for Prometheus observability

mod registry;

pub use registry::{gather_metrics, ANALYSES_TOTAL, UPLOADS_TOTAL, UPSTREAM_CALLS, UPSTREAM_DURATION};

/// Helper to record the outcome of one analysis
pub fn record_analysis(outcome: &str) {
    ANALYSES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Helper to record one upstream call
pub fn record_upstream_call(status: &str, duration_secs: f64) {
    UPSTREAM_CALLS.with_label_values(&[status]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[status])
        .observe(duration_secs);
}

pub fn record_upload(outcome: &str) {
    UPLOADS_TOTAL.with_label_values(&[outcome]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorded_metrics_are_exported() {
        record_analysis("answered");
        record_upstream_call("200", 0.42);
        record_upload("stored");

        let text = gather_metrics();
        assert!(text.contains("analyses_total"));
        assert!(text.contains("upstream_duration_seconds"));
        assert!(text.contains("uploads_total"));
    }
}
