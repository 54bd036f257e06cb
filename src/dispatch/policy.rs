//! Which task failures cancel the siblings.

use serde::{Deserialize, Serialize};

use crate::http::SendError;

/// Decides whether a failed task cancels the shared scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any error cancels the siblings, transport failures included.
    #[default]
    FailFast,
    /// Only a semantic failure reported by the remote cancels the siblings.
    SemanticOnly,
}

impl FailurePolicy {
    /// Returns true if `error` should cancel the shared scope.
    ///
    /// A task that was itself cancelled never re-triggers cancellation.
    pub fn should_cancel(&self, error: &SendError) -> bool {
        match (self, error) {
            (_, SendError::Cancelled) => false,
            (FailurePolicy::FailFast, _) => true,
            (FailurePolicy::SemanticOnly, SendError::Semantic(_)) => true,
            (FailurePolicy::SemanticOnly, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_fast_cancels_on_any_failure() {
        let policy = FailurePolicy::FailFast;
        assert!(policy.should_cancel(&SendError::Transport("reset".into())));
        assert!(policy.should_cancel(&SendError::RequestConstruction("bad".into())));
        assert!(policy.should_cancel(&SendError::Semantic("error".into())));
        assert!(!policy.should_cancel(&SendError::Cancelled));
    }

    #[test]
    fn semantic_only_ignores_transport_failures() {
        let policy = FailurePolicy::SemanticOnly;
        assert!(!policy.should_cancel(&SendError::Transport("reset".into())));
        assert!(policy.should_cancel(&SendError::Semantic("error".into())));
    }

    #[test]
    fn deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: FailurePolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"semantic_only\"").unwrap();
        assert_eq!(w.policy, FailurePolicy::SemanticOnly);
    }
}
