//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dados_requests_total` (counter): requests by method, route, status
//! - `dados_request_duration_seconds` (histogram): latency by method, route
//! - `dados_fetch_total` (counter): collaborator calls by table, outcome
//! - `dados_fetch_duration_seconds` (histogram): collaborator latency by table
//!
//! Without an installed exporter every call here is a no-op.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

use crate::error::ServerError;

/// Parse the exporter bind address, reporting the bad value on failure.
pub fn parse_metrics_address(raw: &str) -> Result<SocketAddr, ServerError> {
    raw.parse::<SocketAddr>()
        .map_err(|e| ServerError::Metrics(format!("invalid metrics address '{}': {}", raw, e)))
}

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), ServerError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    metrics::counter!(
        "dados_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "dados_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(elapsed);
}

/// Record one collaborator call.
pub fn record_fetch(table: &str, success: bool, start: Instant) {
    let outcome = if success { "ok" } else { "error" };

    metrics::counter!(
        "dados_fetch_total",
        "table" => table.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!("dados_fetch_duration_seconds", "table" => table.to_string())
        .record(start.elapsed().as_secs_f64());
}
