//! Resilience decorators.
//!
//! # Data Flow
//! ```text
//! Request from outer layers:
//!     → retries.rs (re-send on error, linear backoff between attempts)
//!         → timeouts.rs (bound a single attempt)
//!             → inner sender
//!     ← last error surfaced once attempts run out
//! ```
//!
//! # Design Decisions
//! - Backoff sleeps race the request's cancellation scope
//! - Cancellation is never retried
//! - A timed-out attempt is a transport error, so it is retried like one

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{retry, RetrySender};
pub use timeouts::{timeout, TimeoutSender};
