use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Tolerance applied to every amount comparison.
pub const SETTLE_EPSILON: Decimal = dec!(0.01);

/// Decimal places every amount is rounded to.
pub const AMOUNT_SCALE: u32 = 2;

/// Smallest representable amount step.
pub const CENT: Decimal = dec!(0.01);

pub const PERCENT_TOTAL: Decimal = dec!(100);

/// Upper bound on simplifier reduction passes. Each pass removes weight from
/// the graph so real inputs stop far earlier.
pub const MAX_REDUCTION_PASSES: usize = 100_000;

// Audit actions
pub const EVENT_CREATED: &str = "EVENT_CREATED";
pub const EVENT_DELETED: &str = "EVENT_DELETED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const EXPENSE_REMOVED: &str = "EXPENSE_REMOVED";
pub const PAYMENT_ADDED: &str = "PAYMENT_ADDED";
pub const PAYMENT_REMOVED: &str = "PAYMENT_REMOVED";
pub const EVENT_AUTO_SETTLED: &str = "EVENT_AUTO_SETTLED";
pub const EVENT_SETTLED: &str = "EVENT_SETTLED";
pub const EVENT_REOPENED: &str = "EVENT_REOPENED";
pub const DEBTS_QUERIED: &str = "DEBTS_QUERIED";
