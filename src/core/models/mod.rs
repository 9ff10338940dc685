pub mod audit;
pub mod balance;
pub mod event;
pub mod expense;
pub mod payment;

pub use audit::AppLog;
pub use balance::{BalanceGraph, Debt};
pub use event::{Event, EventState};
pub use expense::{Expense, ParticipantId};
pub use payment::Payment;
