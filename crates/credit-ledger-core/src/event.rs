//! Ledger events: the immutable facts a balance is reconstructed from.
//!
//! There are exactly two kinds of event. A [`GrantEvent`] makes credit usable
//! over a half-open window, a [`SpendEvent`] consumes credit at one instant.
//! Neither is ever edited; corrections are further events.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, GrantId, Timestamp};

/// A block of credit usable from `available_from` up to, but not including,
/// `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEvent {
    /// Quantity granted.
    pub amount: Amount,

    /// First instant at which the credit can be spent.
    pub available_from: Timestamp,

    /// First instant at which the credit can no longer be spent.
    pub expires_at: Timestamp,

    /// Caller bookkeeping label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GrantId>,
}

impl GrantEvent {
    /// Create an unlabelled grant.
    pub fn new(amount: Amount, available_from: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            amount,
            available_from,
            expires_at,
            id: None,
        }
    }

    /// Attach a bookkeeping label.
    pub fn with_id(mut self, id: impl Into<GrantId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether the window is empty, i.e. the grant is expired on arrival.
    pub fn is_inverted(&self) -> bool {
        self.expires_at <= self.available_from
    }
}

/// A request to consume credit at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendEvent {
    /// Quantity to consume.
    pub amount: Amount,

    /// Instant of consumption.
    pub at: Timestamp,
}

impl SpendEvent {
    /// Create a spend.
    pub fn new(amount: Amount, at: Timestamp) -> Self {
        Self { amount, at }
    }
}

/// A ledger event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerEvent {
    Grant(GrantEvent),
    Spend(SpendEvent),
}

impl LedgerEvent {
    /// The instant at which replay applies this event.
    ///
    /// A grant applies when it becomes available, a spend when it happens.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            LedgerEvent::Grant(grant) => grant.available_from,
            LedgerEvent::Spend(spend) => spend.at,
        }
    }

    /// The quantity carried by the event.
    pub fn amount(&self) -> Amount {
        match self {
            LedgerEvent::Grant(grant) => grant.amount,
            LedgerEvent::Spend(spend) => spend.amount,
        }
    }

    /// Check if this is a grant.
    pub fn is_grant(&self) -> bool {
        matches!(self, LedgerEvent::Grant(_))
    }

    /// Check if this is a spend.
    pub fn is_spend(&self) -> bool {
        matches!(self, LedgerEvent::Spend(_))
    }
}

impl From<GrantEvent> for LedgerEvent {
    fn from(grant: GrantEvent) -> Self {
        LedgerEvent::Grant(grant)
    }
}

impl From<SpendEvent> for LedgerEvent {
    fn from(spend: SpendEvent) -> Self {
        LedgerEvent::Spend(spend)
    }
}

/// An event together with its position in the log.
///
/// `seq` is assigned by the log on append and only serves to order events
/// that share a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Recording position, starting at 0.
    pub seq: u64,

    /// The event itself.
    pub event: LedgerEvent,
}

impl RecordedEvent {
    /// Pair an event with its recording position.
    pub fn new(seq: u64, event: impl Into<LedgerEvent>) -> Self {
        Self {
            seq,
            event: event.into(),
        }
    }

    /// Replay key: timestamp first, recording order second.
    pub fn replay_key(&self) -> (Timestamp, u64) {
        (self.event.timestamp(), self.seq)
    }
}
