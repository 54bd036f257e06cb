//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::dispatch::FailurePolicy;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Retry decorator settings.
    pub retries: RetryConfig,

    /// Headers injected into every request.
    pub headers: HeaderConfig,

    /// Fan-out dispatcher settings.
    pub dispatch: DispatchConfig,

    /// Base transport settings.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Demo endpoints used by the binary.
    pub demo: DemoConfig,
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable the retry decorator.
    pub enabled: bool,

    /// Retries after the first attempt.
    pub max_attempts: u32,

    /// Linear backoff step in milliseconds.
    pub base_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 5,
            base_backoff_ms: 1000,
        }
    }
}

/// Header injection configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HeaderConfig {
    /// Value for the `Authorization` header.
    pub authorization: Option<String>,

    /// Stamp each request with an `x-request-id`.
    pub request_id: bool,

    /// Additional headers, applied in order.
    pub extra: Vec<HeaderEntry>,
}

/// A single `name: value` header.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Which failures cancel sibling tasks.
    pub failure_policy: FailurePolicy,

    /// Response body that marks a semantic failure.
    pub semantic_error_body: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::FailFast,
            semantic_error_body: "error".to_string(),
        }
    }
}

/// Base transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Per-attempt timeout in seconds. No timeout when unset.
    pub request_timeout_secs: Option<u64>,

    /// Largest response body that will be buffered.
    pub max_body_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            request_timeout_secs: None,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Demo endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Delay before the slow endpoint answers, in milliseconds.
    pub slow_delay_ms: u64,

    /// Address the demo servers bind to. Port 0 picks a free port.
    pub bind_address: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            slow_delay_ms: 2000,
            bind_address: "127.0.0.1:0".to_string(),
        }
    }
}
