//! Task Scope
//!
//! Spawned requests are wrapped in `Abortable` and their handles collected
//! here. When the owning page unmounts every handle is aborted, so a late
//! response is dropped instead of writing into disposed signals.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Default)]
pub struct TaskScope {
    handles: Arc<Mutex<Vec<AbortHandle>>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope that aborts its tasks when the current reactive owner is cleaned up
    pub fn bound() -> Self {
        let scope = Self::new();
        let on_drop = scope.clone();
        on_cleanup(move || on_drop.abort_all());
        scope
    }

    /// Register `fut` with this scope
    pub fn wrap<F: Future>(&self, fut: F) -> Abortable<F> {
        let (handle, registration) = AbortHandle::new_pair();
        if let Ok(mut handles) = self.handles.lock() {
            handles.retain(|h| !h.is_aborted());
            handles.push(handle);
        }
        Abortable::new(fut, registration)
    }

    pub fn spawn(&self, fut: impl Future<Output = ()> + 'static) {
        let task = self.wrap(fut);
        spawn_local(async move {
            if task.await.is_err() {
                log::debug!("[task] dropped a task after its page unmounted");
            }
        });
    }

    pub fn abort_all(&self) {
        if let Ok(mut handles) = self.handles.lock() {
            for handle in handles.drain(..) {
                handle.abort();
            }
        }
    }

    /// Handles still registered (aborted ones are pruned on the next `wrap`)
    pub fn len(&self) -> usize {
        self.handles.lock().map(|h| h.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::Aborted;

    #[test]
    fn test_wrapped_future_completes() {
        let scope = TaskScope::new();
        let result = block_on(scope.wrap(async { 7 }));
        assert_eq!(result, Ok(7));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_abort_all_drops_pending_work() {
        let scope = TaskScope::new();
        let first = scope.wrap(async { "late response" });
        let second = scope.wrap(async { "another" });

        scope.abort_all();

        assert_eq!(block_on(first), Err(Aborted));
        assert_eq!(block_on(second), Err(Aborted));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_clones_share_handles() {
        let scope = TaskScope::new();
        let clone = scope.clone();
        let task = clone.wrap(async {});
        scope.abort_all();
        assert!(block_on(task).is_err());
    }
}
