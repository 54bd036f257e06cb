//! Base sender performing real HTTP I/O.
//!
//! # Responsibilities
//! - Send a request over hyper-util's pooled client
//! - Buffer the response body up to a configured limit
//! - Abort in-flight I/O as soon as the request's scope is cancelled
//!
//! # Design Decisions
//! - The scope is checked before any I/O and then raced against the exchange
//! - Dropping the in-flight future is what aborts the connection
//! - Only plain HTTP is supported; TLS is left to the embedding application

use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::body::Body;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::client::Sender;
use crate::config::TransportConfig;
use crate::http::error::{SendError, SendResult};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::observability::metrics;

/// Sender backed by a hyper connection pool.
#[derive(Clone)]
pub struct HyperSender {
    client: Client<HttpConnector, Body>,
    max_body_bytes: usize,
}

impl HyperSender {
    /// Create a sender from transport settings.
    pub fn new(config: &TransportConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            max_body_bytes: config.max_body_bytes,
        }
    }

    async fn exchange(&self, request: &Request) -> SendResult<Response> {
        let wire = request.to_http()?;

        let response: hyper::Response<Incoming> = self
            .client
            .request(wire)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(Body::new(body), self.max_body_bytes)
            .await
            .map_err(|e| SendError::Transport(format!("failed to read body: {}", e)))?;

        Ok(Response::new(parts.status, parts.headers, body))
    }
}

impl Default for HyperSender {
    fn default() -> Self {
        Self::new(&TransportConfig::default())
    }
}

impl std::fmt::Debug for HyperSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperSender")
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[async_trait]
impl Sender for HyperSender {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        let scope = request.scope().clone();
        if scope.is_cancelled() {
            return Err(SendError::Cancelled);
        }

        let start = Instant::now();
        let result = tokio::select! {
            biased;
            _ = scope.cancelled() => Err(SendError::Cancelled),
            result = self.exchange(request) => result,
        };

        match &result {
            Ok(response) => {
                tracing::debug!(
                    method = %request.method(),
                    url = %request.url(),
                    status = %response.status(),
                    "Request completed"
                );
            }
            Err(e) => {
                tracing::debug!(
                    method = %request.method(),
                    url = %request.url(),
                    error = %e,
                    "Request failed"
                );
            }
        }
        metrics::record_send(&result, start);

        result
    }
}
