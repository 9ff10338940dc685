//! Debt-settlement engine for shared expenses.
//!
//! Expenses and payments between participants are folded into a graph of who
//! owes whom ([`accumulate`]), optionally reduced to fewer transfers
//! ([`simplify`]), and checked for the point where everything nets to zero
//! ([`compute_debts`]). [`Event`] scopes a subset of records with its own
//! settle/reopen lifecycle, and [`EventService`] is the async caller that
//! stores events and audits every change.

pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::accumulator::{Accumulation, accumulate};
pub use crate::core::errors::{FieldError, SettleError};
pub use crate::core::models::{AppLog, BalanceGraph, Debt, Event, EventState, Expense, ParticipantId, Payment};
pub use crate::core::services::{EventService, EventUpdate};
pub use crate::core::settlement::{DebtReport, SettlementFlags, compute_debts, detect_settlement};
pub use crate::core::simplifier::simplify;
pub use crate::core::splitter::{Contribution, Split, SplitMethod, split_expense, validate_expense, validate_payment};
pub use config::{CONFIG, EngineSettings};
pub use infrastructure::logging::in_memory::InMemoryLogging;
pub use infrastructure::storage::in_memory::InMemoryEventStore;

#[cfg(test)]
mod tests; // Include integration tests
