//! Retry with linear backoff.
//!
//! # Responsibilities
//! - Re-send a failed request up to `max_attempts` more times
//! - Sleep `base_backoff * attempt` between attempts
//! - Stop immediately when the request's scope is cancelled
//!
//! # Design Decisions
//! - Cancellation and malformed requests are returned at once; every other error is retried
//! - The last observed error is the one surfaced
//! - The sender keeps no per-call state, so one instance serves concurrent calls

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{BoxSender, Decorator, Sender};
use crate::http::error::{SendError, SendResult};
use crate::http::{Request, Response};
use crate::observability::metrics;
use crate::resilience::backoff::linear_backoff;

/// Retries the inner sender on error.
pub struct RetrySender {
    inner: BoxSender,
    max_attempts: u32,
    base_backoff: Duration,
}

impl RetrySender {
    /// `max_attempts` is the number of retries; the request is tried at most
    /// `max_attempts + 1` times.
    pub fn new(inner: BoxSender, max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            inner,
            max_attempts,
            base_backoff,
        }
    }
}

#[async_trait]
impl Sender for RetrySender {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        let scope = request.scope().clone();
        let mut attempt: u32 = 0;

        loop {
            let error = match self.inner.send(request).await {
                Ok(response) => return Ok(response),
                Err(e @ (SendError::Cancelled | SendError::RequestConstruction(_))) => {
                    return Err(e)
                }
                Err(e) => e,
            };

            if attempt >= self.max_attempts {
                tracing::warn!(
                    url = %request.url(),
                    attempts = attempt + 1,
                    error = %error,
                    "Retries exhausted"
                );
                return Err(error);
            }

            let delay = linear_backoff(self.base_backoff, attempt);
            tracing::debug!(
                url = %request.url(),
                attempt,
                delay = ?delay,
                error = %error,
                "Retrying request"
            );
            metrics::record_retry();

            tokio::select! {
                biased;
                _ = scope.cancelled() => {
                    tracing::debug!(url = %request.url(), attempt, "Backoff interrupted by cancellation");
                    return Err(SendError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}

/// Decorator retrying failed requests with linear backoff.
pub fn retry(max_attempts: u32, base_backoff: Duration) -> Decorator {
    Decorator::new(move |inner| {
        Arc::new(RetrySender::new(inner, max_attempts, base_backoff)) as BoxSender
    })
}
