use crate::core::accumulator::accumulate;
use crate::core::models::{BalanceGraph, Event, Expense, Payment};
use crate::core::simplifier::simplify;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// IDs of expenses and payments.
///
/// As an output of the engine these are the records that may be marked
/// settled because, taken together, they net to zero.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementFlags {
    pub expense_ids: Vec<String>,
    pub payment_ids: Vec<String>,
}

impl SettlementFlags {
    pub fn is_empty(&self) -> bool {
        self.expense_ids.is_empty() && self.payment_ids.is_empty()
    }

    /// Marks every flagged record of the event as settled. Returns how many
    /// records changed.
    pub fn apply_to_event(&self, event: &mut Event) -> usize {
        let mut changed = 0;
        for id in &self.expense_ids {
            if let Some(expense) = event.expenses.get_mut(id) {
                if !expense.settled {
                    expense.settled = true;
                    changed += 1;
                }
            }
        }
        for id in &self.payment_ids {
            if let Some(payment) = event.payments.get_mut(id) {
                if !payment.settled {
                    payment.settled = true;
                    changed += 1;
                }
            }
        }
        debug!("Marked {} records of event {} as settled", changed, event.id);
        changed
    }
}

/// Settle signal for a finished graph: when nothing is owed but active records
/// went into the computation, all of them are settleable.
pub fn detect_settlement(graph: &BalanceGraph, active: &SettlementFlags) -> SettlementFlags {
    if graph.is_empty() && !active.is_empty() {
        info!(
            "Balances net to zero across {} expenses and {} payments",
            active.expense_ids.len(),
            active.payment_ids.len()
        );
        active.clone()
    } else {
        SettlementFlags::default()
    }
}

/// Final balances of a batch together with its settle signal.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebtReport {
    pub graph: BalanceGraph,
    pub flags: SettlementFlags,
}

/// Accumulates, optionally simplifies, and checks the result for settlement.
pub fn compute_debts<'a, E, P>(expenses: E, payments: P, simplify_debts: bool) -> DebtReport
where
    E: IntoIterator<Item = &'a Expense>,
    P: IntoIterator<Item = &'a Payment>,
{
    let accumulation = accumulate(expenses, payments);
    if !simplify_debts {
        return DebtReport {
            graph: accumulation.graph,
            flags: accumulation.settleable,
        };
    }

    let graph = simplify(&accumulation.graph);
    let flags = if accumulation.settleable.is_empty() {
        detect_settlement(&graph, &accumulation.active)
    } else {
        accumulation.settleable
    };
    DebtReport { graph, flags }
}
