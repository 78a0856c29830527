//! Error types for the store module.

use std::sync::PoisonError;

use thiserror::Error;

/// Errors that can occur during event log operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A writer panicked while holding the log lock.
    #[error("event log lock poisoned")]
    LockPoisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
