//! EventLog trait: the abstract interface for event storage.
//!
//! This trait keeps the ledger storage-agnostic. The only implementation
//! shipped here is the in-memory [`MemoryEventLog`](crate::MemoryEventLog).

use credit_ledger_core::{LedgerEvent, RecordedEvent};

use crate::error::Result;

/// Append-only log of ledger events.
///
/// # Design Notes
///
/// - **Append-only**: events are never edited or removed.
/// - **Recording order**: `append` assigns consecutive `seq` values starting
///   at 0. The order only breaks ties between equal timestamps.
/// - **Snapshot isolation**: `snapshot` returns a copy. Appends that land
///   after it returns are invisible to whoever holds the copy, and appends
///   never interleave with a snapshot being taken.
pub trait EventLog: Send + Sync {
    /// Append an event and return it with its assigned position.
    fn append(&self, event: LedgerEvent) -> Result<RecordedEvent>;

    /// Copy every recorded event, in recording order.
    fn snapshot(&self) -> Result<Vec<RecordedEvent>>;

    /// Number of recorded events.
    fn len(&self) -> Result<usize>;

    /// Whether nothing has been recorded yet.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Extension trait for common log patterns.
pub trait EventLogExt: EventLog {
    /// Append several events in order, returning their positions.
    fn append_all<I>(&self, events: I) -> Result<Vec<u64>>
    where
        I: IntoIterator,
        I::Item: Into<LedgerEvent>,
    {
        events
            .into_iter()
            .map(|event| self.append(event.into()).map(|recorded| recorded.seq))
            .collect()
    }
}

impl<L: EventLog + ?Sized> EventLogExt for L {}
