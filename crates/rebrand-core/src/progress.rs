use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One observational progress record per performed operation.
///
/// Events carry a strictly increasing sequence number and are delivered in the
/// exact order the operations happen, never batched or coalesced.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub sequence: usize,
    pub message: String,
}

/// Cooperative cancellation handle shared between the caller and a run.
///
/// The engine polls the flag at the start of every loop iteration; an
/// operation already in flight finishes before cancellation is honored.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let flag = CancelFlag::new();
        let observer = flag.clone();

        assert!(!observer.is_cancelled());
        flag.cancel();
        assert!(observer.is_cancelled());
    }
}
