//! HTTP request/response model and the base transport.
//!
//! # Data Flow
//! ```text
//! Caller
//!     → request.rs (method, url, headers, body, cancellation scope)
//!     → [decorator chain mutates headers, retries]
//!     → transport.rs (hyper client, raced against the scope)
//!     → response.rs (status, headers, buffered body)
//!     → error.rs on any failure
//! ```
//!
//! # Design Decisions
//! - Bodies are fully buffered; requests are re-sendable without copying
//! - Errors carry rendered messages so they can be cloned into reports
//! - A cancelled scope always surfaces as `SendError::Cancelled`

pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use error::SendError;
pub use request::{Request, X_REQUEST_ID};
pub use response::Response;
pub use transport::HyperSender;
