use crate::constants::{CENT, PERCENT_TOTAL};
use crate::core::errors::SettleError;
use crate::core::models::{Expense, ParticipantId, Payment};
use crate::core::money::{approx_eq, floor_amount, round_amount};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitMethod {
    Equal,
    Percentage,
    Custom,
}

/// How an expense is shared among its debtors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Split {
    Equal(Vec<ParticipantId>),
    /// Participant to percent of the amount, summing to 100.
    Percentage(BTreeMap<ParticipantId, Decimal>),
    /// Participant to owed amount, summing to the expense amount.
    Custom(BTreeMap<ParticipantId, Decimal>),
}

impl Split {
    pub fn method(&self) -> SplitMethod {
        match self {
            Split::Equal(_) => SplitMethod::Equal,
            Split::Percentage(_) => SplitMethod::Percentage,
            Split::Custom(_) => SplitMethod::Custom,
        }
    }
}

/// What each payer put in and what each debtor owes for one expense.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contribution {
    pub payers: BTreeMap<ParticipantId, Decimal>,
    pub debtors: BTreeMap<ParticipantId, Decimal>,
}

/// Splits `amount` between debtors and checks the payers cover it exactly.
///
/// Shares are in cents and sum to `amount`; cents left over by rounding go
/// one each to participants in id order. Zero shares are left out.
pub fn split_expense(
    amount: Decimal,
    payers: &BTreeMap<ParticipantId, Decimal>,
    split: &Split,
) -> Result<Contribution, SettleError> {
    if amount < Decimal::ZERO {
        return Err(SettleError::invalid_input(
            "amount",
            "Invalid Amount",
            "Amount cannot be negative",
        ));
    }
    ensure_non_negative(payers)?;

    let paid: Decimal = payers.values().sum();
    if !approx_eq(paid, amount) {
        warn!("Payers cover {} of expense amount {}", paid, amount);
        return Err(SettleError::InvalidSplit);
    }

    let debtors = match split {
        Split::Equal(participants) => split_equally(amount, participants)?,
        Split::Percentage(percentages) => split_by_percentage(amount, percentages)?,
        Split::Custom(shares) => split_custom(amount, shares)?,
    };
    debug!(
        "Split {} by {:?} across {} debtors",
        amount,
        split.method(),
        debtors.len()
    );

    Ok(Contribution {
        payers: without_zero_shares(payers.clone()),
        debtors: without_zero_shares(debtors),
    })
}

fn split_equally(
    amount: Decimal,
    participants: &[ParticipantId],
) -> Result<BTreeMap<ParticipantId, Decimal>, SettleError> {
    if participants.is_empty() {
        return Err(SettleError::EmptySplit);
    }
    let mut seen = BTreeSet::new();
    for participant in participants {
        if !seen.insert(participant) {
            return Err(SettleError::DuplicateParticipant(participant.clone()));
        }
    }

    let share = floor_amount(amount / Decimal::from(participants.len()));
    let mut shares: BTreeMap<ParticipantId, Decimal> =
        participants.iter().map(|p| (p.clone(), share)).collect();
    distribute_remainder(&mut shares, amount);
    Ok(shares)
}

fn split_by_percentage(
    amount: Decimal,
    percentages: &BTreeMap<ParticipantId, Decimal>,
) -> Result<BTreeMap<ParticipantId, Decimal>, SettleError> {
    if percentages.is_empty() {
        return Err(SettleError::EmptySplit);
    }
    let total: Decimal = percentages.values().sum();
    if percentages.values().any(|p| *p < Decimal::ZERO) || !approx_eq(total, PERCENT_TOTAL) {
        warn!("Split percentages sum to {}", total);
        return Err(SettleError::InvalidPercentage);
    }

    let mut shares: BTreeMap<ParticipantId, Decimal> = percentages
        .iter()
        .map(|(p, pct)| (p.clone(), round_amount(amount * pct / PERCENT_TOTAL)))
        .collect();
    distribute_remainder(&mut shares, amount);
    Ok(shares)
}

fn split_custom(
    amount: Decimal,
    shares: &BTreeMap<ParticipantId, Decimal>,
) -> Result<BTreeMap<ParticipantId, Decimal>, SettleError> {
    if shares.is_empty() {
        return Err(SettleError::EmptySplit);
    }
    ensure_non_negative(shares)?;
    let total: Decimal = shares.values().sum();
    if !approx_eq(total, amount) {
        warn!("Custom shares sum {} does not match amount {}", total, amount);
        return Err(SettleError::InvalidSplit);
    }
    Ok(shares.clone())
}

/// Moves shares a cent at a time, in id order, until they sum to `target`.
/// Shares never drop below zero.
fn distribute_remainder(shares: &mut BTreeMap<ParticipantId, Decimal>, target: Decimal) {
    let mut remainder = round_amount(target) - shares.values().sum::<Decimal>();
    while remainder != Decimal::ZERO {
        let step = if remainder > Decimal::ZERO { CENT } else { -CENT };
        let mut moved = false;
        for share in shares.values_mut() {
            if remainder == Decimal::ZERO {
                break;
            }
            if *share + step < Decimal::ZERO {
                continue;
            }
            *share += step;
            remainder -= step;
            moved = true;
        }
        if !moved {
            break;
        }
    }
}

fn ensure_non_negative(amounts: &BTreeMap<ParticipantId, Decimal>) -> Result<(), SettleError> {
    match amounts.iter().find(|(_, amount)| **amount < Decimal::ZERO) {
        Some((participant, _)) => Err(SettleError::NegativeShare(participant.clone())),
        None => Ok(()),
    }
}

fn without_zero_shares(shares: BTreeMap<ParticipantId, Decimal>) -> BTreeMap<ParticipantId, Decimal> {
    shares
        .into_iter()
        .filter(|(_, amount)| *amount != Decimal::ZERO)
        .collect()
}

impl Expense {
    /// Builds an expense whose payer and debtor maps come from `split`.
    pub fn from_split(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        payers: &BTreeMap<ParticipantId, Decimal>,
        split: &Split,
    ) -> Result<Expense, SettleError> {
        let contribution = split_expense(amount, payers, split)?;
        let mut expense = Expense::new(id, amount, contribution.payers, contribution.debtors);
        expense.description = description.into();
        Ok(expense)
    }
}

/// Rejects expenses whose payers or debtors don't add up to the amount.
pub fn validate_expense(expense: &Expense) -> Result<(), SettleError> {
    if expense.amount < Decimal::ZERO {
        return Err(SettleError::invalid_input(
            "amount",
            "Invalid Amount",
            "Amount cannot be negative",
        ));
    }
    ensure_non_negative(&expense.payers)?;
    ensure_non_negative(&expense.debtors)?;

    let paid: Decimal = expense.payers.values().sum();
    let owed: Decimal = expense.debtors.values().sum();
    if !approx_eq(paid, expense.amount) || !approx_eq(owed, expense.amount) {
        warn!(
            "Expense {} has payers {} and debtors {} for amount {}",
            expense.id, paid, owed, expense.amount
        );
        return Err(SettleError::UnbalancedExpense(expense.id.clone()));
    }
    Ok(())
}

pub fn validate_payment(payment: &Payment) -> Result<(), SettleError> {
    if payment.from == payment.to {
        return Err(SettleError::SelfPayment);
    }
    if payment.amount <= Decimal::ZERO {
        return Err(SettleError::InvalidPaymentAmount);
    }
    Ok(())
}
