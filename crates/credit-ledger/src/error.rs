//! Error types for the ledger.

use credit_ledger_core::{CoreError, InsufficientCredit, ValidationError};
use credit_ledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A spend at or before the queried instant could not be covered.
    ///
    /// The balance is undefined, not zero.
    #[error(transparent)]
    InsufficientCredit(#[from] InsufficientCredit),

    /// Record-time validation rejected the event.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Event log error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Encoding error while digesting the log.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

impl LedgerError {
    /// Whether this is a historical shortfall rather than an operational
    /// failure.
    pub fn is_insufficient_credit(&self) -> bool {
        matches!(self, LedgerError::InsufficientCredit(_))
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
