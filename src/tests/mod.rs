mod accumulator_tests;
mod event_tests;

use crate::config::EngineSettings;
use crate::core::models::{BalanceGraph, Expense, Payment};
use crate::core::services::EventService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryEventStore;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub fn shares(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries
        .iter()
        .map(|(participant, amount)| (participant.to_string(), *amount))
        .collect()
}

/// Expense whose amount is the sum of its debtor shares.
pub fn expense(id: &str, payers: &[(&str, Decimal)], debtors: &[(&str, Decimal)]) -> Expense {
    let amount = debtors.iter().map(|(_, amount)| *amount).sum();
    Expense::new(id, amount, shares(payers), shares(debtors))
}

pub fn payment(id: &str, from: &str, to: &str, amount: Decimal) -> Payment {
    Payment::new(id, from, to, amount)
}

pub fn graph(edges: &[(&str, &str, Decimal)]) -> BalanceGraph {
    BalanceGraph::from_debts(edges.iter().map(|(debtor, creditor, amount)| (*debtor, *creditor, *amount)))
}

pub fn no_payments() -> Vec<Payment> {
    Vec::new()
}

pub fn no_expenses() -> Vec<Expense> {
    Vec::new()
}

pub fn create_test_service(settings: EngineSettings) -> EventService<InMemoryEventStore, InMemoryLogging> {
    let _ = env_logger::try_init();
    EventService::new(InMemoryEventStore::new(), InMemoryLogging::new(), settings)
}
