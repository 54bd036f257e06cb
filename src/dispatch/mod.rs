//! Cancellation-propagating fan-out.
//!
//! # Data Flow
//! ```text
//! run_all(parent, tasks)
//!     → child scope derived from parent
//!     → one Tokio task per DispatchTask:
//!         build Request (label) → attach child scope
//!         → sender.send (possibly decorated)
//!         → semantic.rs inspects the response body
//!         → on failure, policy.rs decides whether to cancel the child scope
//!     → join barrier: wait for every task
//!     → DispatchReport
//! ```
//!
//! # Design Decisions
//! - The dispatcher itself never fails; outcomes are reported per task
//! - Nothing is retried here; retries belong to the sender chain
//! - Cancellation is a single idempotent broadcast, not per-task messaging

pub mod dispatcher;
pub mod policy;
pub mod semantic;

pub use dispatcher::{DispatchReport, DispatchTask, Dispatcher, TaskOutcome};
pub use policy::FailurePolicy;
pub use semantic::{error_body, ResponseCheck};
