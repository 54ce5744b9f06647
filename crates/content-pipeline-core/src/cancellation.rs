//! Cooperative cancellation

use crate::error::{GenerateError, GenerateResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Token the host flips to abandon a run
///
/// Clones share the same flag. The analyzer checks it once per class and once
/// per property; the emitter once per class artifact.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            tracing::debug!("cancellation requested");
        }
    }

    /// Check if cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(Cancelled)` once cancellation has been requested
    pub fn check(&self) -> GenerateResult<()> {
        if self.is_cancelled() {
            Err(GenerateError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn CancellationToken___new___not_cancelled() {
        let token = CancellationToken::new();

        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn CancellationToken___cancel___visible_through_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        clone.cancel();

        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(GenerateError::Cancelled)));
    }

    #[test]
    fn CancellationToken___cancel_twice___stays_cancelled() {
        let token = CancellationToken::new();

        token.cancel();
        token.cancel();

        assert!(token.is_cancelled());
    }

    #[test]
    fn CancellationToken___cancel_from_thread___observed() {
        let token = CancellationToken::new();
        let remote = token.clone();

        std::thread::spawn(move || remote.cancel()).join().unwrap();

        assert!(token.is_cancelled());
    }
}
