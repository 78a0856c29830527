//! The Ledger: unified API for recording credit events and querying
//! balances.
//!
//! The ledger owns one event log. Recording only appends; every query takes
//! a snapshot of the log and reconstructs the answer from scratch, so events
//! may arrive in any order relative to their timestamps.

use serde::{Deserialize, Serialize};

use credit_ledger_core::{
    replay, validate_event, Amount, Balance, GrantEvent, GrantId, LedgerEvent, LogDigest, RecordedEvent,
    SpendEvent, Statement, Timestamp,
};
use credit_ledger_store::{EventLog, MemoryEventLog};

use crate::error::Result;

/// Configuration for the Ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Reject zero grants and empty grant windows when recording.
    ///
    /// Off by default: replay already treats such grants as contributing
    /// nothing.
    pub validate_on_record: bool,
}

impl LedgerConfig {
    /// Configuration with record-time validation switched on.
    pub fn strict() -> Self {
        Self {
            validate_on_record: true,
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Recording grants and spends, in any timestamp order
/// - Querying the balance or full statement at any instant
/// - Fingerprinting the recorded history
///
/// Recording takes `&self`; the log serialises appends against snapshots, so
/// a ledger can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct Ledger<L: EventLog = MemoryEventLog> {
    /// The event log backend.
    log: L,
    /// Configuration.
    config: LedgerConfig,
}

impl Ledger<MemoryEventLog> {
    /// Create a ledger over a fresh in-memory log with default config.
    pub fn in_memory() -> Self {
        Self::new(MemoryEventLog::new(), LedgerConfig::default())
    }
}

impl Default for Ledger<MemoryEventLog> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<L: EventLog> Ledger<L> {
    /// Create a ledger over the given log.
    pub fn new(log: L, config: LedgerConfig) -> Self {
        Self { log, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Get the log reference.
    pub fn log(&self) -> &L {
        &self.log
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Recording
    // ─────────────────────────────────────────────────────────────────────────

    /// Record credit usable from `available_from` until `expires_at`.
    ///
    /// Returns the event's recording position.
    pub fn record_grant(
        &self,
        amount: Amount,
        available_from: Timestamp,
        expires_at: Timestamp,
    ) -> Result<u64> {
        self.record(GrantEvent::new(amount, available_from, expires_at).into())
    }

    /// Record a grant carrying a bookkeeping label.
    ///
    /// The label is echoed back in statements and never affects balances.
    pub fn record_grant_with_id(
        &self,
        id: impl Into<GrantId>,
        amount: Amount,
        available_from: Timestamp,
        expires_at: Timestamp,
    ) -> Result<u64> {
        self.record(GrantEvent::new(amount, available_from, expires_at).with_id(id).into())
    }

    /// Record a spend at `at`.
    ///
    /// Never fails for lack of credit: whether the spend could be covered is
    /// only known at query time, since an earlier grant may still arrive.
    pub fn record_spend(&self, amount: Amount, at: Timestamp) -> Result<u64> {
        self.record(SpendEvent::new(amount, at).into())
    }

    /// Record any event.
    pub fn record(&self, event: LedgerEvent) -> Result<u64> {
        if self.config.validate_on_record {
            validate_event(&event)?;
        }

        let recorded = self.log.append(event)?;
        match &recorded.event {
            LedgerEvent::Grant(grant) => tracing::debug!(
                seq = recorded.seq,
                amount = grant.amount.get(),
                available_from = grant.available_from.get(),
                expires_at = grant.expires_at.get(),
                "grant recorded"
            ),
            LedgerEvent::Spend(spend) => tracing::debug!(
                seq = recorded.seq,
                amount = spend.amount.get(),
                at = spend.at.get(),
                "spend recorded"
            ),
        }

        Ok(recorded.seq)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Every recorded event, in recording order.
    pub fn events(&self) -> Result<Vec<RecordedEvent>> {
        Ok(self.log.snapshot()?)
    }

    /// Unexpired balance at `at`.
    ///
    /// Fails with [`LedgerError::InsufficientCredit`](crate::LedgerError::InsufficientCredit)
    /// if any spend at or before `at` could not be covered when it happened.
    pub fn balance_at(&self, at: Timestamp) -> Result<Balance> {
        Ok(self.statement_at(at)?.balance)
    }

    /// Balance at `at` together with the credit buckets that make it up.
    pub fn statement_at(&self, at: Timestamp) -> Result<Statement> {
        let events = self.log.snapshot()?;

        match replay::statement_at(&events, at) {
            Ok(statement) => {
                tracing::debug!(
                    at = at.get(),
                    events = events.len(),
                    balance = %statement.balance,
                    "balance reconstructed"
                );
                Ok(statement)
            }
            Err(shortfall) => {
                tracing::debug!(
                    at = at.get(),
                    spend_at = shortfall.spend_at.get(),
                    unmet = shortfall.unmet.get(),
                    "balance undefined"
                );
                Err(shortfall.into())
            }
        }
    }

    /// Digest of the recorded history.
    ///
    /// Equal digests imply equal answers to every query.
    pub fn digest(&self) -> Result<LogDigest> {
        let events = self.log.snapshot()?;
        Ok(LogDigest::of(&events)?)
    }
}
