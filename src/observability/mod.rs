//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Senders and the dispatcher produce:
//!     → logging.rs (structured tracing events, one span per dispatched task)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Library code only emits; the binary decides where events go
//! - Metrics are no-ops until a recorder is installed
//! - Task label is a span field, so every event inside a task carries it

pub mod logging;
pub mod metrics;
