//! End-to-end ledger behaviour: out-of-order recording, retroactive repair,
//! expiry boundaries and consumption order.

use credit_ledger::{Amount, Balance, Ledger, LedgerError, LedgerEvent, Timestamp};
use proptest::prelude::*;
use serde::Deserialize;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn a(n: u64) -> Amount {
    Amount(n)
}

fn t(n: i64) -> Timestamp {
    Timestamp(n)
}

fn assert_insufficient(result: credit_ledger::Result<Balance>) {
    match result {
        Err(LedgerError::InsufficientCredit(_)) => {}
        other => panic!("expected insufficient credit, got {other:?}"),
    }
}

#[test]
fn test_late_grant_covers_earlier_spend() {
    init_tracing();
    let ledger = Ledger::in_memory();

    ledger.record_spend(a(1), t(30)).unwrap();
    assert_insufficient(ledger.balance_at(t(30)));
    assert_insufficient(ledger.balance_at(t(40)));

    ledger.record_grant(a(1), t(10), t(100)).unwrap();
    assert_eq!(ledger.balance_at(t(10)).unwrap(), a(1));
    assert_eq!(ledger.balance_at(t(20)).unwrap(), a(1));
    assert_eq!(ledger.balance_at(t(30)).unwrap(), a(0));
}

#[test]
fn test_overlapping_grants_drain_in_expiry_order() {
    init_tracing();
    let ledger = Ledger::in_memory();

    ledger.record_grant(a(3), t(10), t(60)).unwrap();
    assert_eq!(ledger.balance_at(t(10)).unwrap(), a(3));

    ledger.record_grant(a(2), t(20), t(40)).unwrap();
    ledger.record_spend(a(1), t(30)).unwrap();
    ledger.record_spend(a(3), t(50)).unwrap();

    assert_eq!(ledger.balance_at(t(10)).unwrap(), a(3));
    assert_eq!(ledger.balance_at(t(20)).unwrap(), a(5));
    assert_eq!(ledger.balance_at(t(30)).unwrap(), a(4));
    assert_eq!(ledger.balance_at(t(40)).unwrap(), a(3));
    assert_eq!(ledger.balance_at(t(50)).unwrap(), a(0));
}

#[test]
fn test_zero_spend_never_fails() {
    let ledger = Ledger::in_memory();
    ledger.record_spend(a(0), t(5)).unwrap();
    assert_eq!(ledger.balance_at(t(5)).unwrap(), a(0));
    assert_eq!(ledger.balance_at(t(500)).unwrap(), a(0));
}

#[test]
fn test_query_before_history_is_zero() {
    let ledger = Ledger::in_memory();
    ledger.record_grant(a(9), t(100), t(200)).unwrap();
    ledger.record_spend(a(50), t(150)).unwrap();
    assert_eq!(ledger.balance_at(t(99)).unwrap(), a(0));
}

#[test]
fn test_balances_past_u64_max_stay_exact() {
    init_tracing();
    let ledger = Ledger::in_memory();
    ledger.record_grant(a(u64::MAX), t(0), t(100)).unwrap();
    ledger.record_grant(a(u64::MAX), t(0), t(100)).unwrap();
    ledger.record_spend(a(u64::MAX), t(5)).unwrap();

    let before = ledger.balance_at(t(4)).unwrap();
    let after = ledger.balance_at(t(5)).unwrap();
    assert_ne!(before, after, "spend at t=5 must lower the balance");
    assert_eq!(before, Balance(2 * u128::from(u64::MAX)));
    assert_eq!(after, a(u64::MAX));

    // A second full spend still fits; a third does not.
    ledger.record_spend(a(u64::MAX), t(6)).unwrap();
    assert_eq!(ledger.balance_at(t(6)).unwrap(), a(0));
    ledger.record_spend(a(1), t(7)).unwrap();
    assert_insufficient(ledger.balance_at(t(7)));
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    events: Vec<LedgerEvent>,
    expect: Vec<Expectation>,
}

/// `balance: null` means the query must fail with insufficient credit.
#[derive(Debug, Deserialize)]
struct Expectation {
    at: Timestamp,
    balance: Option<Amount>,
}

const SCENARIOS: &str = r#"[
    {
        "name": "spend spanning two buckets",
        "events": [
            {"kind": "grant", "amount": 4, "available_from": 0, "expires_at": 30},
            {"kind": "grant", "amount": 4, "available_from": 0, "expires_at": 20},
            {"kind": "spend", "amount": 6, "at": 10}
        ],
        "expect": [
            {"at": 10, "balance": 2},
            {"at": 19, "balance": 2},
            {"at": 20, "balance": 2},
            {"at": 30, "balance": 0}
        ]
    },
    {
        "name": "expired credit cannot cover a spend",
        "events": [
            {"kind": "spend", "amount": 1, "at": 20},
            {"kind": "grant", "amount": 5, "available_from": 0, "expires_at": 20}
        ],
        "expect": [
            {"at": 19, "balance": 5},
            {"at": 20, "balance": null},
            {"at": 1000, "balance": null}
        ]
    },
    {
        "name": "labelled grants behave like plain ones",
        "events": [
            {"kind": "grant", "amount": 2, "available_from": 5, "expires_at": 15, "id": "trial"},
            {"kind": "spend", "amount": 2, "at": 5}
        ],
        "expect": [
            {"at": 4, "balance": 0},
            {"at": 5, "balance": 0},
            {"at": 14, "balance": 0}
        ]
    }
]"#;

#[test]
fn test_json_scenarios() {
    init_tracing();
    let scenarios: Vec<Scenario> = serde_json::from_str(SCENARIOS).unwrap();

    for scenario in scenarios {
        let ledger = Ledger::in_memory();
        for event in scenario.events {
            ledger.record(event).unwrap();
        }

        for expectation in scenario.expect {
            let got = ledger.balance_at(expectation.at);
            match expectation.balance {
                Some(balance) => assert_eq!(
                    got.unwrap(),
                    balance,
                    "scenario '{}' at {}",
                    scenario.name,
                    expectation.at
                ),
                None => assert!(
                    got.as_ref().is_err_and(LedgerError::is_insufficient_credit),
                    "scenario '{}' at {}: expected shortfall, got {:?}",
                    scenario.name,
                    expectation.at,
                    got
                ),
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

fn arb_event() -> impl Strategy<Value = LedgerEvent> {
    prop_oneof![
        (0u64..20, 0i64..100, 0i64..150).prop_map(|(amount, from, until)| {
            credit_ledger::GrantEvent::new(a(amount), t(from), t(until)).into()
        }),
        (0u64..20, 0i64..120)
            .prop_map(|(amount, at)| credit_ledger::SpendEvent::new(a(amount), t(at)).into()),
    ]
}

fn ledger_from(events: &[LedgerEvent]) -> Ledger {
    let ledger = Ledger::in_memory();
    for event in events {
        ledger.record(event.clone()).unwrap();
    }
    ledger
}

/// Comparable form of a query result.
fn outcome(result: credit_ledger::Result<Balance>) -> Result<Balance, (Timestamp, Amount)> {
    result.map_err(|e| match e {
        LedgerError::InsufficientCredit(shortfall) => (shortfall.spend_at, shortfall.unmet),
        other => panic!("unexpected error {other:?}"),
    })
}

/// Events whose timestamps are pairwise distinct, plus a reshuffle.
fn arb_distinct_with_shuffle() -> impl Strategy<Value = (Vec<LedgerEvent>, Vec<LedgerEvent>)> {
    prop::collection::vec(arb_event(), 0..20)
        .prop_map(|events| {
            let mut seen = std::collections::BTreeSet::new();
            events
                .into_iter()
                .filter(|e| seen.insert(e.timestamp()))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|events| (Just(events.clone()), Just(events).prop_shuffle()))
}

proptest! {
    #[test]
    fn test_repeated_queries_agree(
        events in prop::collection::vec(arb_event(), 0..30),
        at in 0i64..160,
    ) {
        let ledger = ledger_from(&events);
        let first = outcome(ledger.balance_at(t(at)));
        let second = outcome(ledger.balance_at(t(at)));
        prop_assert_eq!(first, second);

        let twin = ledger_from(&events);
        prop_assert_eq!(twin.digest().unwrap(), ledger.digest().unwrap());
        prop_assert_eq!(outcome(twin.balance_at(t(at))), first);
    }

    #[test]
    fn test_recording_order_irrelevant_for_distinct_timestamps(
        (events, shuffled) in arb_distinct_with_shuffle(),
        at in 0i64..160,
    ) {
        let original = ledger_from(&events);
        let reordered = ledger_from(&shuffled);
        prop_assert_eq!(
            outcome(original.balance_at(t(at))),
            outcome(reordered.balance_at(t(at)))
        );
    }

    #[test]
    fn test_extra_grant_never_hurts(
        events in prop::collection::vec(arb_event(), 0..30),
        amount in 0u64..20,
        from in 0i64..100,
        until in 0i64..150,
        at in 0i64..160,
    ) {
        let ledger = ledger_from(&events);
        let before = outcome(ledger.balance_at(t(at)));

        ledger.record_grant(a(amount), t(from), t(until)).unwrap();
        let after = outcome(ledger.balance_at(t(at)));

        if let Ok(before) = before {
            prop_assert!(matches!(after, Ok(balance) if balance >= before));
        }
    }

    #[test]
    fn test_early_large_grant_repairs_every_shortfall(
        events in prop::collection::vec(arb_event(), 0..30),
        at in 0i64..160,
    ) {
        let ledger = ledger_from(&events);
        let total_spent: u64 = events
            .iter()
            .filter(|e| e.is_spend())
            .map(|e| e.amount().get())
            .sum();

        ledger.record_grant(a(total_spent), t(-1), t(i64::MAX)).unwrap();
        prop_assert!(ledger.balance_at(t(at)).is_ok());
    }

    #[test]
    fn test_expiry_boundary_is_closed(
        amount in 1u64..1000,
        from in -50i64..50,
        len in 1i64..50,
    ) {
        let ledger = Ledger::in_memory();
        let until = from + len;
        ledger.record_grant(a(amount), t(from), t(until)).unwrap();

        prop_assert_eq!(ledger.balance_at(t(until).pred()).unwrap(), a(amount));
        prop_assert_eq!(ledger.balance_at(t(until)).unwrap(), a(0));
    }

    #[test]
    fn test_earlier_expiry_drained_before_later(
        short in 1u64..50,
        long in 1u64..50,
        spend in 0u64..100,
    ) {
        prop_assume!(spend <= short + long);
        let ledger = Ledger::in_memory();
        ledger.record_grant(a(long), t(0), t(200)).unwrap();
        ledger.record_grant(a(short), t(0), t(100)).unwrap();
        ledger.record_spend(a(spend), t(10)).unwrap();

        let statement = ledger.statement_at(t(10)).unwrap();
        let left_in = |expiry: i64| {
            statement
                .buckets
                .iter()
                .filter(|b| b.expires_at == t(expiry))
                .map(|b| b.remaining.get())
                .sum::<u64>()
        };

        prop_assert_eq!(left_in(100), short.saturating_sub(spend));
        prop_assert_eq!(left_in(200), long - spend.saturating_sub(short));
    }
}
