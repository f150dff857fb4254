//! HTTP API handlers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::debug;

use crate::metrics;
use crate::resolver;

/// Application state shared with handlers.
///
/// `server_id` is injected once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Label identifying this backend instance.
    pub server_id: Arc<str>,
    /// Render handle for the /metrics endpoint, if the recorder is installed.
    metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state for the given backend label.
    pub fn new(server_id: impl Into<Arc<str>>) -> Self {
        Self {
            server_id: server_id.into(),
            metrics_handle: None,
        }
    }

    /// Attach the Prometheus render handle.
    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// Echo response for the root endpoint.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    /// Status: "success".
    pub status: &'static str,
    /// Which backend instance served the request.
    pub server_id: String,
    /// The resolved originating caller.
    pub client_ip: String,
    /// The resolved forwarding intermediary.
    pub load_balancer_ip: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "UP".
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Which backend instance served the request.
    pub id: String,
}

/// Root handler - echoes the caller's resolved addresses.
///
/// The peer address is optional: in-process requests (tests) carry no
/// connect info, which degrades to the "unknown" sentinel path.
pub async fn echo(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let start = Instant::now();

    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let resolved = resolver::resolve_from_headers(&headers, peer);

    debug!(
        client_ip = %resolved.client_ip,
        load_balancer_ip = %resolved.load_balancer_ip,
        "Resolved request addresses"
    );

    metrics::inc_echo_requests();
    if resolved.client_is_unknown() {
        metrics::inc_client_ip_unknown();
    }
    metrics::record_request_latency(start, "/");

    Json(EchoResponse {
        status: "success",
        server_id: state.server_id.to_string(),
        client_ip: resolved.client_ip,
        load_balancer_ip: resolved.load_balancer_ip,
    })
}

/// Health check handler - always returns 200, regardless of headers.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    metrics::inc_health_requests();

    Json(HealthResponse {
        status: "UP",
        service: "Backend API",
        id: state.server_id.to_string(),
    })
}

/// Prometheus exposition handler.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_holds_server_id() {
        let state = AppState::new("Backend-1");
        assert_eq!(&*state.server_id, "Backend-1");
        assert!(state.metrics_handle.is_none());
    }
}
