//! Metrics collection and exposition.
//!
//! # Metrics
//! - `client_requests_total` (counter): base-transport sends by outcome
//! - `client_request_duration_seconds` (histogram): base-transport latency
//! - `client_retries_total` (counter): retries scheduled by the retry decorator
//! - `dispatch_tasks_total` (counter): dispatched tasks by outcome
//! - `dispatch_cancellations_total` (counter): scopes cancelled by a failing task

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::http::error::SendResult;
use crate::http::Response;

/// Install the Prometheus recorder and its HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one base-transport send.
pub fn record_send(result: &SendResult<Response>, start: Instant) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.kind(),
    };
    counter!("client_requests_total", "outcome" => outcome).increment(1);
    histogram!("client_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_retry() {
    counter!("client_retries_total").increment(1);
}

/// Record a finished dispatch task.
pub fn record_task(outcome: &'static str) {
    counter!("dispatch_tasks_total", "outcome" => outcome).increment(1);
}

pub fn record_cancellation() {
    counter!("dispatch_cancellations_total").increment(1);
}
