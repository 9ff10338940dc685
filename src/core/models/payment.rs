use super::expense::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money handed directly from `from` to `to`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Decimal,
    #[serde(default)]
    pub settled: bool,
}

impl Payment {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<ParticipantId>,
        to: impl Into<ParticipantId>,
        amount: Decimal,
    ) -> Self {
        Payment {
            id: id.into(),
            event_id: None,
            from: from.into(),
            to: to.into(),
            amount,
            settled: false,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.settled
    }
}
