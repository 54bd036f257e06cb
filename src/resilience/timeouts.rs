//! Per-attempt timeout enforcement.
//!
//! # Responsibilities
//! - Bound a single call to the inner sender
//! - Drop the in-flight call when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - An elapsed deadline is reported as a transport error
//! - Placed inside the retry layer it bounds each attempt, outside it bounds the whole call

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{BoxSender, Decorator, Sender};
use crate::http::error::{SendError, SendResult};
use crate::http::{Request, Response};

/// Fails a call that takes longer than `limit`.
pub struct TimeoutSender {
    inner: BoxSender,
    limit: Duration,
}

impl TimeoutSender {
    pub fn new(inner: BoxSender, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl Sender for TimeoutSender {
    async fn send(&self, request: &mut Request) -> SendResult<Response> {
        let outcome = tokio::time::timeout(self.limit, self.inner.send(request)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(url = %request.url(), limit = ?self.limit, "Request timed out");
                Err(SendError::Transport(format!(
                    "request timed out after {}ms",
                    self.limit.as_millis()
                )))
            }
        }
    }
}

/// Decorator bounding each call to `limit`.
pub fn timeout(limit: Duration) -> Decorator {
    Decorator::new(move |inner| Arc::new(TimeoutSender::new(inner, limit)) as BoxSender)
}
