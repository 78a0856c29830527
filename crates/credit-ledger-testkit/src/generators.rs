//! Proptest generators for property-based testing.

use proptest::prelude::*;

use credit_ledger_core::{
    Amount, GrantEvent, GrantId, LedgerEvent, RecordedEvent, SpendEvent, Timestamp,
};

/// Generate a small amount, zero included.
pub fn amount() -> impl Strategy<Value = Amount> {
    (0u64..=100).prop_map(Amount)
}

/// Generate a timestamp on a short timeline so events collide often.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (0i64..=200).prop_map(Timestamp)
}

/// Generate an optional grant label.
pub fn grant_id() -> impl Strategy<Value = Option<GrantId>> {
    proptest::option::of("[a-z]{1,8}".prop_map(GrantId::from))
}

/// Generate a grant whose window is non-empty.
pub fn grant_event() -> impl Strategy<Value = GrantEvent> {
    (amount(), timestamp(), 1i64..=100, grant_id()).prop_map(|(amount, from, len, id)| {
        GrantEvent {
            amount,
            available_from: from,
            expires_at: Timestamp(from.get() + len),
            id,
        }
    })
}

/// Generate a grant with any window, inverted ones included.
pub fn any_grant_event() -> impl Strategy<Value = GrantEvent> {
    (amount(), timestamp(), timestamp())
        .prop_map(|(amount, from, until)| GrantEvent::new(amount, from, until))
}

/// Generate a spend.
pub fn spend_event() -> impl Strategy<Value = SpendEvent> {
    (amount(), timestamp()).prop_map(|(amount, at)| SpendEvent::new(amount, at))
}

/// Generate a grant or a spend.
pub fn ledger_event() -> impl Strategy<Value = LedgerEvent> {
    prop_oneof![
        grant_event().prop_map(LedgerEvent::Grant),
        any_grant_event().prop_map(LedgerEvent::Grant),
        spend_event().prop_map(LedgerEvent::Spend),
    ]
}

/// Generate a recorded history of up to `max_len` events.
pub fn history(max_len: usize) -> impl Strategy<Value = Vec<RecordedEvent>> {
    prop::collection::vec(ledger_event(), 0..=max_len).prop_map(|events| {
        events
            .into_iter()
            .enumerate()
            .map(|(seq, event)| RecordedEvent::new(seq as u64, event))
            .collect()
    })
}

/// Parameters for a ledger history and the instant queried against it.
#[derive(Debug, Clone)]
pub struct HistoryParams {
    pub events: Vec<LedgerEvent>,
    pub query_at: Timestamp,
}

impl Arbitrary for HistoryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (prop::collection::vec(ledger_event(), 0..=32), 0i64..=320)
            .prop_map(|(events, at)| HistoryParams {
                events,
                query_at: Timestamp(at),
            })
            .boxed()
    }
}
