//! # Credit Ledger Store
//!
//! Storage abstraction for the credit ledger. Provides a trait-based
//! interface for the append-only event log and an in-memory implementation.
//!
//! ## Key Types
//!
//! - [`EventLog`] - The trait for all log operations
//! - [`MemoryEventLog`] - Lock-guarded in-memory log
//! - [`StoreError`] - Log failures (never business-logic failures)
//!
//! ## Usage
//!
//! ```rust
//! use credit_ledger_core::{Amount, GrantEvent, Timestamp};
//! use credit_ledger_store::{EventLog, MemoryEventLog};
//!
//! let log = MemoryEventLog::new();
//! let recorded = log
//!     .append(GrantEvent::new(Amount(3), Timestamp(10), Timestamp(60)).into())
//!     .unwrap();
//! assert_eq!(recorded.seq, 0);
//! assert_eq!(log.snapshot().unwrap().len(), 1);
//! ```
//!
//! ## Design Notes
//!
//! - **No interpretation**: the log never looks at amounts or timestamps
//! - **Recording order**: positions are consecutive and start at 0
//! - **Snapshot isolation**: readers work on a copy taken under the lock

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryEventLog;
pub use traits::{EventLog, EventLogExt};
