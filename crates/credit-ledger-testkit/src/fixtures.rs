//! Test fixtures and helpers.
//!
//! Common setup code for ledger tests.

use credit_ledger::{Amount, Balance, Ledger, LedgerConfig, Result, Timestamp};
use credit_ledger_store::MemoryEventLog;

/// A ledger with terse recording helpers taking raw integers.
pub struct LedgerFixture {
    pub ledger: Ledger,
}

impl LedgerFixture {
    /// Create a fixture over an empty in-memory ledger.
    pub fn new() -> Self {
        Self {
            ledger: Ledger::in_memory(),
        }
    }

    /// Create a fixture whose ledger validates on record.
    pub fn strict() -> Self {
        Self {
            ledger: Ledger::new(MemoryEventLog::new(), LedgerConfig::strict()),
        }
    }

    /// Record a grant, panicking on store failure.
    pub fn grant(&self, amount: u64, available_from: i64, expires_at: i64) -> &Self {
        self.ledger
            .record_grant(Amount(amount), Timestamp(available_from), Timestamp(expires_at))
            .expect("record grant");
        self
    }

    /// Record a labelled grant, panicking on store failure.
    pub fn labelled_grant(
        &self,
        id: &str,
        amount: u64,
        available_from: i64,
        expires_at: i64,
    ) -> &Self {
        self.ledger
            .record_grant_with_id(id, Amount(amount), Timestamp(available_from), Timestamp(expires_at))
            .expect("record grant");
        self
    }

    /// Record a spend, panicking on store failure.
    pub fn spend(&self, amount: u64, at: i64) -> &Self {
        self.ledger
            .record_spend(Amount(amount), Timestamp(at))
            .expect("record spend");
        self
    }

    /// Balance at `at` as a raw integer.
    pub fn balance(&self, at: i64) -> Result<u128> {
        self.ledger.balance_at(Timestamp(at)).map(Balance::get)
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A single spend recorded before any credit exists, then covered by a
/// grant available twenty units earlier.
pub fn retroactive_repair() -> LedgerFixture {
    let fixture = LedgerFixture::new();
    fixture.spend(1, 30).grant(1, 10, 100);
    fixture
}

/// Two overlapping grants drained by two spends.
pub fn overlapping_grants() -> LedgerFixture {
    let fixture = LedgerFixture::new();
    fixture
        .grant(3, 10, 60)
        .grant(2, 20, 40)
        .spend(1, 30)
        .spend(3, 50);
    fixture
}

/// Create several independent fixtures for isolation tests.
pub fn independent_fixtures(count: usize) -> Vec<LedgerFixture> {
    (0..count).map(|_| LedgerFixture::new()).collect()
}
