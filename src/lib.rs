//! Resilient outbound HTTP client building blocks.
//!
//! Two independent pieces:
//! - [`dispatch`]: fan out labelled requests under one cancellation scope and
//!   abort every sibling as soon as one fails
//! - [`client`]: wrap a base [`Sender`] in decorators (retry with backoff,
//!   header injection, timeouts) without touching the base sender

// Core
pub mod cancellation;
pub mod client;
pub mod dispatch;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

// Test doubles for the binary and integration tests
pub mod demo;

pub use cancellation::CancellationScope;
pub use client::{decorate, BoxSender, Decorator, Pipeline, Sender};
pub use config::ClientConfig;
pub use dispatch::{DispatchReport, DispatchTask, Dispatcher, FailurePolicy};
pub use http::{HyperSender, Request, Response, SendError};
