//! Commit hook trait.

use std::sync::Arc;

use super::types::CommitEvent;

/// Handler invoked synchronously after each successful commit.
///
/// # Implementation Notes
///
/// - Hooks run on the committing task, inside the store's commit gate,
///   so they must not block or await
/// - Hooks cannot fail the commit; anything that can go wrong is handled
///   (and logged) inside the hook
pub trait CommitHook: Send + Sync {
    /// Unique name for this hook (for logging).
    fn name(&self) -> &str;

    /// Handle a committed create or delete.
    fn on_commit(&self, event: &CommitEvent);
}

/// Shared commit hook handle.
pub type DynCommitHook = Arc<dyn CommitHook>;

impl<H: CommitHook + ?Sized> CommitHook for Arc<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_commit(&self, event: &CommitEvent) {
        (**self).on_commit(event)
    }
}
