use crate::constants::SETTLE_EPSILON;
use crate::core::models::balance::GraphBuilder;
use crate::core::models::{BalanceGraph, Expense, Payment};
use crate::core::settlement::{SettlementFlags, detect_settlement};
use log::debug;
use rust_decimal::Decimal;

/// Result of folding a batch of expenses and payments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accumulation {
    pub graph: BalanceGraph,
    /// Filled only when `graph` is empty and the batch had active records.
    pub settleable: SettlementFlags,
    /// Every active record that fed the graph.
    pub active: SettlementFlags,
}

/// Folds active expenses and payments into pairwise debts.
///
/// Deleted or settled records are skipped. Expenses are applied before
/// payments, each in iteration order. When the result is empty while active
/// records existed, their IDs come back in `settleable`.
pub fn accumulate<'a, E, P>(expenses: E, payments: P) -> Accumulation
where
    E: IntoIterator<Item = &'a Expense>,
    P: IntoIterator<Item = &'a Payment>,
{
    let mut builder = GraphBuilder::new();
    let mut active = SettlementFlags::default();

    for expense in expenses.into_iter().filter(|e| e.is_active()) {
        active.expense_ids.push(expense.id.clone());
        apply_expense(&mut builder, expense);
    }
    for payment in payments.into_iter().filter(|p| p.is_active()) {
        active.payment_ids.push(payment.id.clone());
        apply_payment(&mut builder, payment);
    }

    let graph = builder.finish();
    let settleable = detect_settlement(&graph, &active);
    debug!(
        "Accumulated {} expenses and {} payments into {} debts",
        active.expense_ids.len(),
        active.payment_ids.len(),
        graph.edge_count()
    );

    Accumulation {
        graph,
        settleable,
        active,
    }
}

fn apply_expense(builder: &mut GraphBuilder, expense: &Expense) {
    let payer_count = expense.payers.len();
    for (debtor, debt) in &expense.debtors {
        for payer in expense.payers.keys() {
            if debtor == payer {
                continue;
            }
            builder.add(debtor, payer, debt_charged_to_payer(*debt, payer_count));
        }
    }
}

/// Part of a debtor's share charged against one payer of the expense.
///
/// Every payer is charged the whole share, so an expense with several payers
/// counts the debt once per payer.
fn debt_charged_to_payer(debt: Decimal, _payer_count: usize) -> Decimal {
    debt
}

fn apply_payment(builder: &mut GraphBuilder, payment: &Payment) {
    let from = payment.from.as_str();
    let to = payment.to.as_str();
    let amount = payment.amount;

    // Recipient already owes the sender: the sender is lending more.
    if builder.get(to, from) > Decimal::ZERO {
        builder.add(to, from, amount);
        return;
    }

    let owed = builder.get(from, to);
    if owed > Decimal::ZERO {
        let remaining = (owed - amount).max(Decimal::ZERO);
        if remaining > SETTLE_EPSILON {
            builder.set(from, to, remaining);
        } else {
            builder.remove(from, to);
            if amount > owed {
                builder.add(to, from, amount - owed);
            }
        }
        return;
    }

    // Nothing owed either way: an advance the recipient now owes back.
    builder.add(to, from, amount);
}
