//! Prometheus metrics for request counting and latency tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Echo requests counter metric name.
pub const METRIC_ECHO_REQUESTS: &str = "echo_requests_total";
/// Health-check requests counter metric name.
pub const METRIC_HEALTH_REQUESTS: &str = "health_requests_total";
/// Requests whose client IP resolved to the sentinel.
pub const METRIC_CLIENT_IP_UNKNOWN: &str = "client_ip_unknown_total";
/// Request handling latency metric name.
pub const METRIC_REQUEST_LATENCY: &str = "request_latency_ms";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup; the returned handle renders the
/// exposition text for the /metrics endpoint.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(METRIC_ECHO_REQUESTS, "Total number of echo requests served");
    describe_counter!(
        METRIC_HEALTH_REQUESTS,
        "Total number of health-check requests served"
    );
    describe_counter!(
        METRIC_CLIENT_IP_UNKNOWN,
        "Requests where no client IP could be resolved"
    );
    describe_histogram!(
        METRIC_REQUEST_LATENCY,
        "Request handling latency in milliseconds"
    );

    debug!("Metrics initialized");

    Ok(handle)
}

/// Increment the echo requests counter.
pub fn inc_echo_requests() {
    counter!(METRIC_ECHO_REQUESTS).increment(1);
}

/// Increment the health-check requests counter.
pub fn inc_health_requests() {
    counter!(METRIC_HEALTH_REQUESTS).increment(1);
}

/// Increment the unresolved-client counter.
pub fn inc_client_ip_unknown() {
    counter!(METRIC_CLIENT_IP_UNKNOWN).increment(1);
}

/// Record request handling latency.
pub fn record_request_latency(start: Instant, endpoint: &'static str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_REQUEST_LATENCY, "endpoint" => endpoint).record(latency_ms);
}
