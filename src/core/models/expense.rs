use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque key of a group member or guest.
pub type ParticipantId = String;

/// A shared expense with the amounts each payer put in and each debtor owes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    pub payers: BTreeMap<ParticipantId, Decimal>,
    pub debtors: BTreeMap<ParticipantId, Decimal>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub settled: bool,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        amount: Decimal,
        payers: BTreeMap<ParticipantId, Decimal>,
        debtors: BTreeMap<ParticipantId, Decimal>,
    ) -> Self {
        Expense {
            id: id.into(),
            event_id: None,
            description: String::new(),
            amount,
            payers,
            debtors,
            deleted: false,
            settled: false,
        }
    }

    /// Only active expenses take part in balance computation.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.settled
    }
}
