use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation handle shared between an in-flight fetch and its owner.
///
/// Cloning produces a handle to the same flag, so the owner keeps one clone
/// and passes another into the spawned fetch. The fetch checks the flag once
/// its response arrives; a cancelled handle means the result must be dropped
/// instead of committed to visible state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the operation as cancelled. Visible to every clone.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_to_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn fresh_tokens_are_independent() {
        let first = CancelToken::new();
        first.cancel();

        let second = CancelToken::new();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
