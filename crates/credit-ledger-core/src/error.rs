//! Error types for the credit ledger core.

use thiserror::Error;

use crate::types::{Amount, Timestamp};

/// A spend at or before the queried instant could not be covered.
///
/// Carries the first unsatisfiable spend in replay order. The balance at any
/// instant at or after `spend_at` is undefined until a grant available by
/// `spend_at` is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient credit: spend #{spend_seq} at {spend_at} short by {unmet}")]
pub struct InsufficientCredit {
    /// Timestamp of the spend that ran dry.
    pub spend_at: Timestamp,

    /// Recording position of that spend.
    pub spend_seq: u64,

    /// Amount the spend still needed when no active bucket remained.
    pub unmet: Amount,
}

/// Errors from encoding events.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    EncodingError(String),
}

/// Contract violations caught by optional record-time validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("grant amount must be positive")]
    ZeroGrant,

    #[error("grant expires at {expires_at} which is not after {available_from}")]
    InvertedWindow {
        available_from: Timestamp,
        expires_at: Timestamp,
    },
}
