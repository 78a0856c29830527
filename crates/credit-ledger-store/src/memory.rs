//! In-memory implementation of the EventLog trait.
//!
//! All data is lost when the log is dropped. Thread-safe via RwLock: appends
//! hold the write lock, snapshots the read lock, so a snapshot never sees a
//! half-applied append.

use std::sync::RwLock;

use credit_ledger_core::{LedgerEvent, RecordedEvent};

use crate::error::Result;
use crate::traits::EventLog;

/// In-memory event log.
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    events: RwLock<Vec<RecordedEvent>>,
}

impl MemoryEventLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-populated with events in the given order.
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<LedgerEvent>,
    {
        let events = events
            .into_iter()
            .enumerate()
            .map(|(seq, event)| RecordedEvent::new(seq as u64, event))
            .collect();
        Self {
            events: RwLock::new(events),
        }
    }
}

impl EventLog for MemoryEventLog {
    fn append(&self, event: LedgerEvent) -> Result<RecordedEvent> {
        let mut events = self.events.write()?;

        let recorded = RecordedEvent::new(events.len() as u64, event);
        events.push(recorded.clone());

        tracing::trace!(seq = recorded.seq, "event appended");
        Ok(recorded)
    }

    fn snapshot(&self) -> Result<Vec<RecordedEvent>> {
        let events = self.events.read()?;
        Ok(events.clone())
    }

    fn len(&self) -> Result<usize> {
        let events = self.events.read()?;
        Ok(events.len())
    }
}
