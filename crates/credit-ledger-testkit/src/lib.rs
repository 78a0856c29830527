//! # Credit Ledger Testkit
//!
//! Testing utilities for the credit ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden scenarios**: Recorded histories with expected query outcomes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up ledgers tersely
//!
//! ## Golden Scenarios
//!
//! ```rust
//! use credit_ledger_testkit::vectors::verify_all_scenarios;
//!
//! for (name, passed) in verify_all_scenarios() {
//!     assert!(passed, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use credit_ledger_testkit::generators::HistoryParams;
//!
//! proptest! {
//!     #[test]
//!     fn balance_is_deterministic(params: HistoryParams) {
//!         // record params.events, query params.query_at twice
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use credit_ledger_testkit::fixtures::LedgerFixture;
//!
//! let fixture = LedgerFixture::new();
//! fixture.grant(3, 10, 60).spend(1, 30);
//! assert_eq!(fixture.balance(30).unwrap(), 2);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{independent_fixtures, overlapping_grants, retroactive_repair, LedgerFixture};
pub use generators::HistoryParams;
pub use vectors::{all_scenarios, run_scenario, verify_all_scenarios, GoldenScenario, Outcome};
