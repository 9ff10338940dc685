use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum SettleError {
    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// Split amounts or payer amounts don't add up to the expense amount
    #[error("Invalid split amounts")]
    InvalidSplit,

    /// Split has no participants
    #[error("Split must name at least one participant")]
    EmptySplit,

    /// Percentages are negative or don't add up to 100
    #[error("Invalid split percentages")]
    InvalidPercentage,

    /// Participant appears more than once in an equal split
    #[error("Participant {0} appears more than once in split")]
    DuplicateParticipant(String),

    /// A payer or debtor amount is negative
    #[error("Negative share for participant {0}")]
    NegativeShare(String),

    /// Stored expense violates the zero-sum rule
    #[error("Expense {0} payers and debtors do not match its amount")]
    UnbalancedExpense(String),

    #[error("Cannot record a payment to self")]
    SelfPayment,

    #[error("Payment amount must be positive")]
    InvalidPaymentAmount,

    #[error("Event {0} not found")]
    EventNotFound(String),

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    #[error("Payment {0} not found")]
    PaymentNotFound(String),

    #[error("Expense {0} is already recorded")]
    DuplicateExpense(String),

    #[error("Payment {0} is already recorded")]
    DuplicatePayment(String),

    #[error("Event {0} is already settled")]
    EventAlreadySettled(String),

    #[error("Event {0} is not settled")]
    EventNotSettled(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl SettleError {
    pub(crate) fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        SettleError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }
}
