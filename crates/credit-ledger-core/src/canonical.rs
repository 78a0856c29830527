//! Canonical CBOR encoding of recorded events.
//!
//! Each event is encoded as a fixed-position CBOR array so the same event
//! always produces the same bytes:
//!
//! ```text
//! [version, seq, kind, amount, timestamp, expires_at | null, id | null]
//! ```
//!
//! Arrays carry no key-ordering ambiguity and ciborium always emits the
//! shortest integer form, so no custom encoder is needed.

use ciborium::value::Value;

use crate::error::CoreError;
use crate::event::{LedgerEvent, RecordedEvent};

/// Encoding version, bumped whenever the array layout changes.
pub const CANONICAL_VERSION: u8 = 0;

/// Kind discriminators.
mod kind {
    pub const GRANT: u8 = 0;
    pub const SPEND: u8 = 1;
}

/// Encode a recorded event to canonical CBOR bytes.
pub fn canonical_event_bytes(recorded: &RecordedEvent) -> Result<Vec<u8>, CoreError> {
    let value = event_to_cbor_value(recorded);
    let mut buf = Vec::new();
    ciborium::ser::into_writer(&value, &mut buf)
        .map_err(|e| CoreError::EncodingError(e.to_string()))?;
    Ok(buf)
}

fn event_to_cbor_value(recorded: &RecordedEvent) -> Value {
    let (kind, expires_at, id) = match &recorded.event {
        LedgerEvent::Grant(grant) => (
            kind::GRANT,
            Value::Integer(grant.expires_at.get().into()),
            grant
                .id
                .as_ref()
                .map_or(Value::Null, |id| Value::Text(id.as_str().to_string())),
        ),
        LedgerEvent::Spend(_) => (kind::SPEND, Value::Null, Value::Null),
    };

    Value::Array(vec![
        Value::Integer(CANONICAL_VERSION.into()),
        Value::Integer(recorded.seq.into()),
        Value::Integer(kind.into()),
        Value::Integer(recorded.event.amount().get().into()),
        Value::Integer(recorded.event.timestamp().get().into()),
        expires_at,
        id,
    ])
}
