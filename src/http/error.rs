//! Error taxonomy shared by every sender.

use thiserror::Error;

/// Errors a sender can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// The request could not be built (bad method, URL, or header).
    #[error("request construction failed: {0}")]
    RequestConstruction(String),

    /// Network or read failure, including per-attempt timeouts.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request's scope was cancelled before or during the call.
    #[error("request cancelled")]
    Cancelled,

    /// The remote answered, but the body reports a logical failure.
    #[error("remote reported failure: {0}")]
    Semantic(String),
}

impl SendError {
    /// Returns true for `SendError::Cancelled`.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SendError::Cancelled)
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            SendError::RequestConstruction(_) => "request_construction",
            SendError::Transport(_) => "transport",
            SendError::Cancelled => "cancelled",
            SendError::Semantic(_) => "semantic",
        }
    }
}

/// Result type for send operations.
pub type SendResult<T> = Result<T, SendError>;
