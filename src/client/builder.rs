//! Assembles the configured sender chain.

use std::sync::Arc;
use std::time::Duration;

use crate::client::chain::Pipeline;
use crate::client::headers::{authorization, request_id, try_header};
use crate::client::sender::BoxSender;
use crate::config::ClientConfig;
use crate::http::error::SendResult;
use crate::http::HyperSender;
use crate::resilience::{retry, timeout};

/// Build the configured chain around a [`HyperSender`].
pub fn build_sender(config: &ClientConfig) -> SendResult<BoxSender> {
    let base: BoxSender = Arc::new(HyperSender::new(&config.transport));
    Ok(build_pipeline(config)?.build(base))
}

/// Layers from `config`, outermost first:
/// extra headers, authorization, request id, retry, per-attempt timeout.
pub fn build_pipeline(config: &ClientConfig) -> SendResult<Pipeline> {
    let mut pipeline = Pipeline::new();

    for entry in &config.headers.extra {
        pipeline = pipeline.with(try_header(&entry.name, &entry.value)?);
    }

    if let Some(token) = &config.headers.authorization {
        pipeline = pipeline.with(authorization(token)?);
    }

    if config.headers.request_id {
        pipeline = pipeline.with(request_id());
    }

    if config.retries.enabled {
        pipeline = pipeline.with(retry(
            config.retries.max_attempts,
            Duration::from_millis(config.retries.base_backoff_ms),
        ));
    }

    pipeline = pipeline.with_optional(
        config
            .transport
            .request_timeout_secs
            .map(|secs| timeout(Duration::from_secs(secs))),
    );

    tracing::debug!(layers = pipeline.len(), "Sender pipeline assembled");
    Ok(pipeline)
}
