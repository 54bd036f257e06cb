//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT / Ctrl+C → cancel the root scope
//!         → in-flight dispatches observe cancellation
//!         → demo servers drain and stop
//! ```

pub mod signals;

pub use signals::cancel_on_ctrl_c;
