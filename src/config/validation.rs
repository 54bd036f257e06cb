//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check header names and values are valid HTTP
//! - Validate value ranges and socket addresses
//! - Skip settings of disabled features
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid header name '{0}'")]
    HeaderName(String),

    #[error("invalid value for header '{0}'")]
    HeaderValue(String),

    #[error("invalid socket address for {field}: '{value}'")]
    Address { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Check `config` for problems serde cannot catch.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for entry in &config.headers.extra {
        if HeaderName::from_bytes(entry.name.as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName(entry.name.clone()));
        }
        if HeaderValue::from_str(&entry.value).is_err() {
            errors.push(ValidationError::HeaderValue(entry.name.clone()));
        }
    }

    if let Some(token) = &config.headers.authorization {
        if HeaderValue::from_str(token).is_err() {
            errors.push(ValidationError::HeaderValue("authorization".to_string()));
        }
    }

    if config.transport.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("transport.max_body_bytes"));
    }
    if config.transport.request_timeout_secs == Some(0) {
        errors.push(ValidationError::Zero("transport.request_timeout_secs"));
    }

    if config.dispatch.semantic_error_body.is_empty() {
        errors.push(ValidationError::Empty("dispatch.semantic_error_body"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }
    if config.demo.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "demo.bind_address",
            value: config.demo.bind_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
