//! Cancellation scope with parent → child propagation.

use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;

/// Shared signal telling in-flight work it is no longer wanted.
///
/// Cloning is cheap and yields a handle to the same scope. Use [`child`]
/// to derive a new scope that is cancelled whenever this one is.
///
/// [`child`]: CancellationScope::child
#[derive(Clone)]
pub struct CancellationScope {
    inner: Arc<ScopeInner>,
}

struct ScopeInner {
    /// `true` once cancelled. Holding the sender keeps the channel open for the
    /// lifetime of the scope, so receivers never observe a closed channel.
    state: watch::Sender<bool>,
    /// Children derived from this scope. Dropped children are pruned lazily.
    children: Mutex<Vec<Weak<ScopeInner>>>,
}

impl ScopeInner {
    fn new(cancelled: bool) -> Self {
        let (state, _) = watch::channel(cancelled);
        Self {
            state,
            children: Mutex::new(Vec::new()),
        }
    }

    fn cancel(&self) -> bool {
        let transitioned = self.state.send_if_modified(|cancelled| {
            if *cancelled {
                false
            } else {
                *cancelled = true;
                true
            }
        });

        if transitioned {
            // Taken after the flag flips: a child registered from here on
            // sees the parent as cancelled when it is created.
            let children = std::mem::take(&mut *lock(&self.children));
            for child in children.iter().filter_map(Weak::upgrade) {
                child.cancel();
            }
        }
        transitioned
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // The guarded data is a plain list; a panic while holding it cannot leave it torn.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CancellationScope {
    /// Create a new, independent root scope.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner::new(false)),
        }
    }

    /// Derive a child scope.
    ///
    /// The child is cancelled when this scope is cancelled (including when this
    /// scope is already cancelled), but cancelling the child leaves this scope untouched.
    pub fn child(&self) -> Self {
        let mut children = lock(&self.inner.children);
        let child = Arc::new(ScopeInner::new(self.is_cancelled()));
        children.retain(|weak| weak.strong_count() > 0);
        children.push(Arc::downgrade(&child));
        Self { inner: child }
    }

    /// Cancel this scope and all scopes derived from it.
    ///
    /// Idempotent. Returns `true` only for the call that performed the transition.
    pub fn cancel(&self) -> bool {
        self.inner.cancel()
    }

    /// Returns true once the scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.inner.state.borrow()
    }

    /// Resolve once the scope is cancelled. Resolves immediately if it already is.
    pub async fn cancelled(&self) {
        let mut rx = self.inner.state.subscribe();
        // The sender lives as long as `self`, so this only returns once cancelled.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancellationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationScope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
