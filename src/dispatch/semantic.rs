//! Semantic inspection of successfully transported responses.

use std::sync::Arc;

use crate::http::{Response, SendError};

/// Inspects a response and returns `SendError::Semantic` if its content
/// reports a logical failure.
pub type ResponseCheck = Arc<dyn Fn(&Response) -> Result<(), SendError> + Send + Sync>;

/// Treat a body exactly equal to `marker` as a failure.
pub fn error_body(marker: impl Into<String>) -> ResponseCheck {
    let marker = marker.into();
    Arc::new(move |response: &Response| {
        if response.body()[..] == *marker.as_bytes() {
            Err(SendError::Semantic(marker.clone()))
        } else {
            Ok(())
        }
    })
}
