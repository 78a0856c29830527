//! Golden scenarios for deterministic verification.
//!
//! Each scenario is a recorded history plus the expected outcome of a set
//! of balance queries. Any implementation of the ledger must agree with
//! every expectation. Scenarios serialise to JSON so they can be shared
//! with other implementations.

use serde::{Deserialize, Serialize};

use credit_ledger::{Amount, Balance, Ledger, LedgerError, LedgerEvent, Timestamp};
use credit_ledger_core::{GrantEvent, SpendEvent};

/// Expected outcome of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The query returns this balance.
    Balance(Balance),
    /// The query fails because an earlier spend could not be covered.
    InsufficientCredit,
}

/// A query and its expected outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    pub at: Timestamp,
    pub outcome: Outcome,
}

/// A golden scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenScenario {
    /// Human-readable name.
    pub name: String,
    /// Events in recording order.
    pub events: Vec<LedgerEvent>,
    /// Queries run after every event is recorded.
    pub expectations: Vec<Expectation>,
}

fn grant(amount: u64, from: i64, until: i64) -> LedgerEvent {
    GrantEvent::new(Amount(amount), Timestamp(from), Timestamp(until)).into()
}

fn spend(amount: u64, at: i64) -> LedgerEvent {
    SpendEvent::new(Amount(amount), Timestamp(at)).into()
}

fn expect(at: i64, balance: u128) -> Expectation {
    Expectation {
        at: Timestamp(at),
        outcome: Outcome::Balance(Balance(balance)),
    }
}

fn expect_shortfall(at: i64) -> Expectation {
    Expectation {
        at: Timestamp(at),
        outcome: Outcome::InsufficientCredit,
    }
}

/// Get all golden scenarios.
pub fn all_scenarios() -> Vec<GoldenScenario> {
    vec![
        GoldenScenario {
            name: "uncovered spend".into(),
            events: vec![spend(1, 30)],
            expectations: vec![expect(29, 0), expect_shortfall(30), expect_shortfall(40)],
        },
        GoldenScenario {
            name: "uncovered spend repaired by later-recorded grant".into(),
            events: vec![spend(1, 30), grant(1, 10, 100)],
            expectations: vec![expect(10, 1), expect(20, 1), expect(30, 0), expect(100, 0)],
        },
        GoldenScenario {
            name: "overlapping grants".into(),
            events: vec![grant(3, 10, 60), grant(2, 20, 40), spend(1, 30), spend(3, 50)],
            expectations: vec![
                expect(10, 3),
                expect(20, 5),
                expect(30, 4),
                expect(39, 4),
                expect(40, 3),
                expect(50, 0),
            ],
        },
        GoldenScenario {
            name: "expiry is closed".into(),
            events: vec![grant(7, 0, 25)],
            expectations: vec![expect(24, 7), expect(25, 0)],
        },
        GoldenScenario {
            name: "equal expiries leave together".into(),
            events: vec![grant(2, 0, 50), grant(3, 10, 50)],
            expectations: vec![expect(49, 5), expect(50, 0)],
        },
        GoldenScenario {
            name: "zero spend with no credit".into(),
            events: vec![spend(0, 5)],
            expectations: vec![expect(5, 0), expect(6, 0)],
        },
        GoldenScenario {
            name: "same-instant tie follows recording order".into(),
            events: vec![spend(1, 10), grant(1, 10, 20)],
            expectations: vec![expect_shortfall(10), expect_shortfall(15)],
        },
        GoldenScenario {
            name: "inverted grant is never usable".into(),
            events: vec![grant(5, 10, 5), spend(1, 10)],
            expectations: vec![expect(9, 0), expect_shortfall(10)],
        },
        GoldenScenario {
            name: "earliest expiry drained first".into(),
            events: vec![grant(5, 0, 100), grant(5, 0, 20), spend(6, 10)],
            expectations: vec![expect(10, 4), expect(20, 4), expect(100, 0)],
        },
        GoldenScenario {
            name: "balance wider than one amount".into(),
            events: vec![grant(u64::MAX, 0, 100), grant(u64::MAX, 0, 100), spend(u64::MAX, 5)],
            expectations: vec![
                expect(4, 2 * u128::from(u64::MAX)),
                expect(5, u128::from(u64::MAX)),
                expect(100, 0),
            ],
        },
    ]
}

/// Run a scenario against a fresh in-memory ledger.
///
/// Returns the outcome actually observed for each expectation, in order.
pub fn run_scenario(scenario: &GoldenScenario) -> credit_ledger::Result<Vec<Outcome>> {
    let ledger = Ledger::in_memory();
    for event in &scenario.events {
        ledger.record(event.clone())?;
    }

    scenario
        .expectations
        .iter()
        .map(|expectation| match ledger.balance_at(expectation.at) {
            Ok(balance) => Ok(Outcome::Balance(balance)),
            Err(LedgerError::InsufficientCredit(_)) => Ok(Outcome::InsufficientCredit),
            Err(other) => Err(other),
        })
        .collect()
}

/// Verify every golden scenario.
///
/// Returns `(name, passed)` per scenario.
pub fn verify_all_scenarios() -> Vec<(String, bool)> {
    all_scenarios()
        .iter()
        .map(|scenario| {
            let passed = run_scenario(scenario).is_ok_and(|observed| {
                observed
                    .iter()
                    .zip(&scenario.expectations)
                    .all(|(got, want)| *got == want.outcome)
            });
            (scenario.name.clone(), passed)
        })
        .collect()
}

/// Serialise every golden scenario as pretty JSON.
pub fn scenarios_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_scenarios())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_pass() {
        for (name, passed) in verify_all_scenarios() {
            assert!(passed, "scenario '{}' failed", name);
        }
    }

    #[test]
    fn test_scenarios_survive_json() {
        let json = scenarios_json().unwrap();
        let parsed: Vec<GoldenScenario> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, all_scenarios());
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(expect(10, 3)).unwrap();
        assert_eq!(json["outcome"]["balance"], 3);

        let json = serde_json::to_value(expect_shortfall(10)).unwrap();
        assert_eq!(json["outcome"], "insufficient_credit");
    }

    #[test]
    fn test_mismatch_is_reported() {
        let scenario = GoldenScenario {
            name: "wrong on purpose".into(),
            events: vec![grant(1, 0, 10)],
            expectations: vec![expect(5, 2)],
        };
        let observed = run_scenario(&scenario).unwrap();
        assert_eq!(observed, vec![Outcome::Balance(Balance(1))]);
    }
}
