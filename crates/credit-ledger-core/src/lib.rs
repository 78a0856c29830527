//! # Credit Ledger Core
//!
//! Pure primitives for the credit ledger: events, canonical encoding, and
//! point-in-time balance reconstruction.
//!
//! This crate contains no I/O and no storage. A balance is a function of an
//! event slice and an instant, nothing else.
//!
//! ## Key Types
//!
//! - [`LedgerEvent`] - A grant or a spend, tagged by kind
//! - [`RecordedEvent`] - An event with its recording position
//! - [`Statement`] - Balance plus the surviving credit buckets
//! - [`InsufficientCredit`] - A past spend could not be covered
//!
//! ## Reconstruction
//!
//! See the [`replay`] module for ordering, expiry and consumption rules.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod event;
pub mod replay;
pub mod types;
pub mod validation;

pub use canonical::canonical_event_bytes;
pub use digest::LogDigest;
pub use error::{CoreError, InsufficientCredit, ValidationError};
pub use event::{GrantEvent, LedgerEvent, RecordedEvent, SpendEvent};
pub use replay::{balance_at, replay_order, statement_at, Bucket, Statement};
pub use types::{Amount, Balance, GrantId, Timestamp};
pub use validation::{validate_event, validate_grant};
