//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C into cancellation of a scope
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The watcher exits quietly once the scope is cancelled for another reason

use tokio::task::JoinHandle;

use crate::cancellation::CancellationScope;

/// Cancel `scope` when Ctrl+C is received.
///
/// Must be called from within a Tokio runtime.
pub fn cancel_on_ctrl_c(scope: CancellationScope) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    tracing::info!("Interrupt received, cancelling in-flight work");
                    scope.cancel();
                }
                Err(e) => tracing::warn!(error = %e, "Failed to install Ctrl+C handler"),
            },
            _ = scope.cancelled() => {}
        }
    })
}
