//! # Credit Ledger
//!
//! A time-indexed credit ledger. Grants make credit usable over a window,
//! spends consume the earliest-expiring credit first, and both may be
//! recorded long after (or before) the instant they describe.
//!
//! ## Key Concepts
//!
//! - **Grant**: credit usable from `available_from` until `expires_at`.
//! - **Spend**: a request to consume credit at an instant.
//! - **Reconstruction**: every query replays the recorded history up to the
//!   queried instant. No running balance is kept.
//! - **Historical insufficiency**: a past spend that could not be covered
//!   makes every balance from that instant on undefined, until a grant
//!   available by then is recorded.
//!
//! ## Usage
//!
//! ```rust
//! use credit_ledger::{Amount, Ledger, Timestamp};
//!
//! let ledger = Ledger::in_memory();
//!
//! // A spend recorded before any credit exists...
//! ledger.record_spend(Amount(1), Timestamp(30)).unwrap();
//! assert!(ledger.balance_at(Timestamp(40)).is_err());
//!
//! // ...is covered once an earlier grant arrives.
//! ledger.record_grant(Amount(1), Timestamp(10), Timestamp(100)).unwrap();
//! assert_eq!(ledger.balance_at(Timestamp(20)).unwrap(), Amount(1));
//! assert_eq!(ledger.balance_at(Timestamp(30)).unwrap(), Amount(0));
//! ```
//!
//! ## Re-exports
//!
//! - `credit_ledger::core` - Events, replay, digest
//! - `credit_ledger::store` - Event log abstraction

pub mod error;
pub mod ledger;

// Re-export component crates
pub use credit_ledger_core as core;
pub use credit_ledger_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};

// Re-export commonly used core types
pub use credit_ledger_core::{
    Amount, Balance, Bucket, GrantEvent, GrantId, InsufficientCredit, LedgerEvent, LogDigest,
    RecordedEvent, SpendEvent, Statement, Timestamp,
};
pub use credit_ledger_store::{EventLog, MemoryEventLog};
