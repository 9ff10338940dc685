use crate::core::models::{BalanceGraph, Event, Expense, Payment};
use crate::core::settlement::{DebtReport, compute_debts};
use chrono::Utc;
use log::debug;

impl Event {
    /// Balances of every record in the event, optionally simplified.
    pub fn compute_debts(&self, simplify_debts: bool) -> BalanceGraph {
        self.debt_report(simplify_debts).graph
    }

    /// Balances together with the auto-settlement signal for the event.
    pub fn debt_report(&self, simplify_debts: bool) -> DebtReport {
        compute_debts(self.expenses.values(), self.payments.values(), simplify_debts)
    }

    /// True when nothing is owed within the event.
    pub fn can_settle(&self, simplify_debts: bool) -> bool {
        self.compute_debts(simplify_debts).is_empty()
    }

    /// Marks the event settled. `current_debts` is left untouched as the
    /// record of what was owed at settlement time.
    pub fn settle(self) -> Event {
        debug!("Settling event {}", self.id);
        Event {
            settled: true,
            settled_at: Some(Utc::now()),
            ..self
        }
    }

    pub fn reopen(self) -> Event {
        debug!("Reopening event {}", self.id);
        Event {
            settled: false,
            settled_at: None,
            ..self
        }
        .recomputed()
    }

    pub fn add_expense(mut self, mut expense: Expense) -> Event {
        expense.event_id = Some(self.id.clone());
        self.expenses.insert(expense.id.clone(), expense);
        self.recomputed()
    }

    pub fn add_payment(mut self, mut payment: Payment) -> Event {
        payment.event_id = Some(self.id.clone());
        self.payments.insert(payment.id.clone(), payment);
        self.recomputed()
    }

    pub fn remove_expense(mut self, expense_id: &str) -> Event {
        self.expenses.remove(expense_id);
        self.recomputed()
    }

    pub fn remove_payment(mut self, payment_id: &str) -> Event {
        self.payments.remove(payment_id);
        self.recomputed()
    }

    /// Refreshes `current_debts` from the event's records, unsimplified.
    pub fn recomputed(mut self) -> Event {
        self.current_debts = self.compute_debts(false);
        self
    }
}
