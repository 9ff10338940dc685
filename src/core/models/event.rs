use super::balance::BalanceGraph;
use super::expense::Expense;
use super::payment::Payment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventState {
    Active,
    Settled,
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventState::Active => "ACTIVE",
            EventState::Settled => "SETTLED",
        };
        write!(f, "{}", s)
    }
}

/// Sub-ledger holding a subset of a group's expenses and payments.
///
/// `current_debts` is recomputed on every mutation and kept as-is when the
/// event is settled, so it records the balances at settlement time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub expenses: BTreeMap<String, Expense>,
    pub payments: BTreeMap<String, Payment>,
    pub settled: bool,
    pub current_debts: BalanceGraph,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Event {
            id: id.into(),
            name: name.into(),
            expenses: BTreeMap::new(),
            payments: BTreeMap::new(),
            settled: false,
            current_debts: BalanceGraph::new(),
            created_at: Utc::now(),
            settled_at: None,
        }
    }

    pub fn state(&self) -> EventState {
        if self.settled {
            EventState::Settled
        } else {
            EventState::Active
        }
    }
}
