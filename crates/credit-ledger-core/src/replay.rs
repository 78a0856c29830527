//! Point-in-time balance reconstruction.
//!
//! A balance is never stored. Every query selects the events at or before
//! the queried instant, orders them by `(timestamp, seq)` and replays them
//! through a min-heap of active credit buckets keyed by expiry. Spends drain
//! the earliest-expiring bucket first. A spend that runs out of buckets makes
//! the whole reconstruction fail, however far past it the query lies.
//!
//! Expiry is closed at `expires_at`: a bucket is dropped before any event at
//! or after its expiry is applied, and again at the queried instant itself.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::error::InsufficientCredit;
use crate::event::{GrantEvent, LedgerEvent, RecordedEvent, SpendEvent};
use crate::types::{Amount, Balance, GrantId, Timestamp};

/// The unspent, unexpired remainder of one grant during a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Recording position of the grant this bucket came from.
    pub origin: u64,

    /// The grant's bookkeeping label, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_id: Option<GrantId>,

    /// Credit left in the bucket.
    pub remaining: Amount,

    /// First instant at which the bucket is unusable.
    pub expires_at: Timestamp,
}

/// Heap entry ordered by `(expires_at, origin)` only.
#[derive(Debug)]
struct Queued(Bucket);

impl Queued {
    fn key(&self) -> (Timestamp, u64) {
        (self.0.expires_at, self.0.origin)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Result of a successful reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// The queried instant.
    pub as_of: Timestamp,

    /// Sum of `remaining` over `buckets`.
    pub balance: Balance,

    /// Surviving buckets in the order a spend would drain them.
    pub buckets: Vec<Bucket>,
}

impl Statement {
    /// Credit that becomes unusable strictly before `horizon`.
    pub fn expiring_before(&self, horizon: Timestamp) -> Balance {
        self.buckets
            .iter()
            .filter(|b| b.expires_at < horizon)
            .map(|b| b.remaining)
            .sum()
    }
}

/// Replay state: the active bucket heap and the instant of the last applied
/// event.
///
/// Built fresh for every query and dropped afterwards. Only fed through
/// [`statement_at`], which does the selection and ordering.
#[derive(Debug, Default)]
pub(crate) struct Replay {
    active: BinaryHeap<Reverse<Queued>>,
    clock: Option<Timestamp>,
}

impl Replay {
    /// Create an empty replay.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drop every bucket whose expiry is at or before `now`.
    fn expire(&mut self, now: Timestamp) {
        while let Some(Reverse(head)) = self.active.peek() {
            if head.0.expires_at > now {
                break;
            }
            if let Some(Reverse(Queued(bucket))) = self.active.pop() {
                tracing::trace!(
                    origin = bucket.origin,
                    remaining = bucket.remaining.get(),
                    expires_at = bucket.expires_at.get(),
                    now = now.get(),
                    "bucket expired"
                );
            }
        }
    }

    /// Apply one event: expire at its timestamp, then grant or spend.
    pub(crate) fn apply(&mut self, recorded: &RecordedEvent) -> Result<(), InsufficientCredit> {
        let now = recorded.event.timestamp();
        debug_assert!(
            self.clock.map_or(true, |last| last <= now),
            "events must be applied in timestamp order"
        );
        self.clock = Some(now);
        self.expire(now);

        match &recorded.event {
            LedgerEvent::Grant(grant) => {
                self.apply_grant(recorded.seq, grant);
                Ok(())
            }
            LedgerEvent::Spend(spend) => self.apply_spend(recorded.seq, spend),
        }
    }

    fn apply_grant(&mut self, seq: u64, grant: &GrantEvent) {
        self.active.push(Reverse(Queued(Bucket {
            origin: seq,
            grant_id: grant.id.clone(),
            remaining: grant.amount,
            expires_at: grant.expires_at,
        })));
    }

    fn apply_spend(&mut self, seq: u64, spend: &SpendEvent) -> Result<(), InsufficientCredit> {
        let mut needed = spend.amount;

        while !needed.is_zero() {
            let Some(Reverse(Queued(mut bucket))) = self.active.pop() else {
                tracing::debug!(
                    spend_seq = seq,
                    spend_at = spend.at.get(),
                    unmet = needed.get(),
                    "spend not covered by active credit"
                );
                return Err(InsufficientCredit {
                    spend_at: spend.at,
                    spend_seq: seq,
                    unmet: needed,
                });
            };

            if bucket.remaining > needed {
                bucket.remaining = bucket.remaining.saturating_sub(needed);
                tracing::trace!(
                    origin = bucket.origin,
                    taken = needed.get(),
                    left = bucket.remaining.get(),
                    "bucket partially consumed"
                );
                needed = Amount::ZERO;
                self.active.push(Reverse(Queued(bucket)));
            } else {
                tracing::trace!(
                    origin = bucket.origin,
                    taken = bucket.remaining.get(),
                    "bucket drained"
                );
                needed = needed.saturating_sub(bucket.remaining);
            }
        }

        Ok(())
    }

    /// Run the final expiry pass at `as_of` and produce the statement.
    pub(crate) fn finish(mut self, as_of: Timestamp) -> Statement {
        self.expire(as_of);

        let mut buckets: Vec<Bucket> = self
            .active
            .into_vec()
            .into_iter()
            .map(|Reverse(Queued(bucket))| bucket)
            .collect();
        buckets.sort_by_key(|b| (b.expires_at, b.origin));

        Statement {
            as_of,
            balance: buckets.iter().map(|b| b.remaining).sum(),
            buckets,
        }
    }
}

/// Select the events replayed for a query at `as_of`, in replay order.
///
/// The input may be in any order; recording order is taken from `seq`.
pub fn replay_order(events: &[RecordedEvent], as_of: Timestamp) -> Vec<&RecordedEvent> {
    let mut selected: Vec<&RecordedEvent> = events
        .iter()
        .filter(|recorded| recorded.event.timestamp() <= as_of)
        .collect();
    selected.sort_by_key(|recorded| recorded.replay_key());
    selected
}

/// Reconstruct the full statement at `as_of`.
pub fn statement_at(
    events: &[RecordedEvent],
    as_of: Timestamp,
) -> Result<Statement, InsufficientCredit> {
    let mut replay = Replay::new();
    for recorded in replay_order(events, as_of) {
        replay.apply(recorded)?;
    }
    Ok(replay.finish(as_of))
}

/// Reconstruct the unexpired balance at `as_of`.
pub fn balance_at(
    events: &[RecordedEvent],
    as_of: Timestamp,
) -> Result<Balance, InsufficientCredit> {
    statement_at(events, as_of).map(|statement| statement.balance)
}
