use super::expense::ParticipantId;
use crate::constants::SETTLE_EPSILON;
use crate::core::money::{is_negligible, round_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

type Adjacency = BTreeMap<ParticipantId, BTreeMap<ParticipantId, Decimal>>;

/// One edge of a [`BalanceGraph`]: `debtor` owes `creditor` `amount`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Debt {
    pub debtor: ParticipantId,
    pub creditor: ParticipantId,
    pub amount: Decimal,
}

/// Who owes whom, as `debtor -> (creditor -> amount)`.
///
/// Graphs produced by this crate have no self-loops, at most one edge per
/// ordered pair, and only amounts above the settle epsilon, rounded to cents.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BalanceGraph {
    edges: Adjacency,
}

impl BalanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw edges. Edges between the same ordered pair are
    /// summed, self-debts are skipped, and the result is rounded and trimmed.
    /// Opposite edges are kept apart; see `simplify` for netting.
    pub fn from_debts<I, D, C>(debts: I) -> Self
    where
        I: IntoIterator<Item = (D, C, Decimal)>,
        D: Into<ParticipantId>,
        C: Into<ParticipantId>,
    {
        let mut builder = GraphBuilder::new();
        for (debtor, creditor, amount) in debts {
            let debtor: ParticipantId = debtor.into();
            let creditor: ParticipantId = creditor.into();
            builder.add(&debtor, &creditor, amount);
        }
        builder.finish()
    }

    /// Amount `debtor` owes `creditor`, zero when there is no edge.
    pub fn get(&self, debtor: &str, creditor: &str) -> Decimal {
        self.edges
            .get(debtor)
            .and_then(|row| row.get(creditor))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// All edges, ordered by debtor then creditor.
    pub fn debts(&self) -> Vec<Debt> {
        self.edges
            .iter()
            .flat_map(|(debtor, row)| {
                row.iter().map(move |(creditor, amount)| Debt {
                    debtor: debtor.clone(),
                    creditor: creditor.clone(),
                    amount: *amount,
                })
            })
            .collect()
    }

    pub fn owed_by(&self, debtor: &str) -> Option<&BTreeMap<ParticipantId, Decimal>> {
        self.edges.get(debtor)
    }

    pub fn owed_to(&self, creditor: &str) -> Vec<(ParticipantId, Decimal)> {
        self.edges
            .iter()
            .filter_map(|(debtor, row)| row.get(creditor).map(|amount| (debtor.clone(), *amount)))
            .collect()
    }

    /// What the participant is owed minus what they owe.
    pub fn net_position(&self, participant: &str) -> Decimal {
        let owed: Decimal = self.owed_to(participant).iter().map(|(_, amount)| *amount).sum();
        let owing: Decimal = self
            .owed_by(participant)
            .map(|row| row.values().copied().sum())
            .unwrap_or(Decimal::ZERO);
        owed - owing
    }

    pub fn participants(&self) -> BTreeSet<ParticipantId> {
        let mut participants = BTreeSet::new();
        for (debtor, row) in &self.edges {
            participants.insert(debtor.clone());
            participants.extend(row.keys().cloned());
        }
        participants
    }

    /// Sum of all edge weights.
    pub fn total(&self) -> Decimal {
        self.edges.values().flat_map(|row| row.values()).copied().sum()
    }

    pub fn as_map(&self) -> &BTreeMap<ParticipantId, BTreeMap<ParticipantId, Decimal>> {
        &self.edges
    }
}

/// Mutable adjacency used while a graph is being computed. Only
/// [`GraphBuilder::finish`] turns it into a [`BalanceGraph`].
#[derive(Clone, Debug, Default)]
pub(crate) struct GraphBuilder {
    edges: Adjacency,
}

impl GraphBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, debtor: &str, creditor: &str) -> Decimal {
        self.edges
            .get(debtor)
            .and_then(|row| row.get(creditor))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub(crate) fn contains(&self, debtor: &str, creditor: &str) -> bool {
        self.edges.get(debtor).is_some_and(|row| row.contains_key(creditor))
    }

    /// Adds to the edge, creating it when missing. Self-debts are ignored.
    pub(crate) fn add(&mut self, debtor: &str, creditor: &str, amount: Decimal) {
        if debtor == creditor {
            return;
        }
        *self
            .edges
            .entry(debtor.to_string())
            .or_default()
            .entry(creditor.to_string())
            .or_insert(Decimal::ZERO) += amount;
    }

    pub(crate) fn set(&mut self, debtor: &str, creditor: &str, amount: Decimal) {
        if debtor == creditor {
            return;
        }
        self.edges
            .entry(debtor.to_string())
            .or_default()
            .insert(creditor.to_string(), amount);
    }

    /// Removes the edge and the debtor row if it ends up empty.
    pub(crate) fn remove(&mut self, debtor: &str, creditor: &str) {
        if let Some(row) = self.edges.get_mut(debtor) {
            row.remove(creditor);
            if row.is_empty() {
                self.edges.remove(debtor);
            }
        }
    }

    /// Lowers the edge by `by`; drops it when what is left is negligible.
    pub(crate) fn reduce(&mut self, debtor: &str, creditor: &str, by: Decimal) {
        let remaining = self.get(debtor, creditor) - by;
        if is_negligible(remaining) || remaining < Decimal::ZERO {
            self.remove(debtor, creditor);
        } else {
            self.set(debtor, creditor, remaining);
        }
    }

    /// Snapshot of edges in debtor/creditor order.
    pub(crate) fn edges(&self) -> Vec<(ParticipantId, ParticipantId, Decimal)> {
        self.edges
            .iter()
            .flat_map(|(debtor, row)| {
                row.iter()
                    .map(move |(creditor, amount)| (debtor.clone(), creditor.clone(), *amount))
            })
            .collect()
    }

    pub(crate) fn creditors_of(&self, debtor: &str) -> Vec<(ParticipantId, Decimal)> {
        self.edges
            .get(debtor)
            .map(|row| row.iter().map(|(c, a)| (c.clone(), *a)).collect())
            .unwrap_or_default()
    }

    /// Rounds every edge to cents and keeps only amounts above the epsilon.
    pub(crate) fn finish(self) -> BalanceGraph {
        let edges = self
            .edges
            .into_iter()
            .filter_map(|(debtor, row)| {
                let row: BTreeMap<_, _> = row
                    .into_iter()
                    .map(|(creditor, amount)| (creditor, round_amount(amount)))
                    .filter(|(creditor, amount)| *creditor != debtor && *amount > SETTLE_EPSILON)
                    .collect();
                (!row.is_empty()).then_some((debtor, row))
            })
            .collect();
        BalanceGraph { edges }
    }
}
