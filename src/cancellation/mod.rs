//! Cooperative cancellation subsystem.
//!
//! # Data Flow
//! ```text
//! Root scope (process / CLI)
//!     → child scope per dispatch call
//!     → attached to every Request built by that call
//!     → checked by senders at suspension points (I/O, backoff sleep)
//!
//! cancel():
//!     flag flips false → true (once)
//!     → every waiter on cancelled() wakes
//!     → every live child scope is cancelled too
//! ```
//!
//! # Design Decisions
//! - Cancellation is monotonic: a cancelled scope never resets
//! - Children never cancel their parent
//! - Waiting is a watch channel, so late subscribers see the current state

pub mod scope;

pub use scope::CancellationScope;
