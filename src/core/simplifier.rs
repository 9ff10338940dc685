//! Reduces a balance graph to fewer transfers.
//!
//! Opposite edges between two participants are first netted into one signed
//! amount per pair. The graph is then reduced until nothing changes: mutual
//! debts cancel, and a chain `D -> C -> E` moves as much as both hops allow
//! straight from `D` to `E`. Each reduction lowers the total owed, so the
//! loop ends; it is still capped at `MAX_REDUCTION_PASSES`.

use crate::constants::{MAX_REDUCTION_PASSES, SETTLE_EPSILON};
use crate::core::models::BalanceGraph;
use crate::core::models::balance::GraphBuilder;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Returns the simplified copy of `graph`. Pure and idempotent.
pub fn simplify(graph: &BalanceGraph) -> BalanceGraph {
    let mut builder = net_pairs(graph);

    let mut passes = 0;
    loop {
        let changed = cancel_mutual_debt(&mut builder) || collapse_chain(&mut builder);
        if !changed {
            break;
        }
        passes += 1;
        if passes >= MAX_REDUCTION_PASSES {
            warn!("Debt simplification stopped after {} passes", passes);
            break;
        }
    }

    let simplified = builder.finish();
    debug!(
        "Simplified {} debts into {} after {} passes",
        graph.edge_count(),
        simplified.edge_count(),
        passes
    );
    simplified
}

/// Collapses every pair of participants into a single directed edge.
///
/// Pairs are keyed with the byte-wise smaller id first; a positive net means
/// the smaller id owes the larger one.
fn net_pairs(graph: &BalanceGraph) -> GraphBuilder {
    let mut net: BTreeMap<(&str, &str), Decimal> = BTreeMap::new();
    for (debtor, row) in graph.as_map() {
        for (creditor, amount) in row {
            if debtor == creditor {
                continue;
            }
            let (pair, signed) = if debtor < creditor {
                ((debtor.as_str(), creditor.as_str()), *amount)
            } else {
                ((creditor.as_str(), debtor.as_str()), -*amount)
            };
            *net.entry(pair).or_insert(Decimal::ZERO) += signed;
        }
    }

    let mut builder = GraphBuilder::new();
    for ((low, high), amount) in net {
        if amount.abs() < SETTLE_EPSILON {
            continue;
        }
        if amount > Decimal::ZERO {
            builder.set(low, high, amount);
        } else {
            builder.set(high, low, -amount);
        }
    }
    builder
}

/// Cancels the first pair found owing each other. The smaller edge goes away
/// and the larger one shrinks by the same amount.
fn cancel_mutual_debt(builder: &mut GraphBuilder) -> bool {
    for (debtor, creditor, amount) in builder.edges() {
        if !builder.contains(&creditor, &debtor) {
            continue;
        }
        let back = builder.get(&creditor, &debtor);
        if amount >= back {
            builder.remove(&creditor, &debtor);
            builder.reduce(&debtor, &creditor, back);
        } else {
            builder.remove(&debtor, &creditor);
            builder.reduce(&creditor, &debtor, amount);
        }
        return true;
    }
    false
}

/// Shortcuts the first chain `debtor -> middle -> creditor` found.
fn collapse_chain(builder: &mut GraphBuilder) -> bool {
    for (debtor, middle, first_hop) in builder.edges() {
        for (creditor, second_hop) in builder.creditors_of(&middle) {
            if creditor == debtor {
                continue;
            }
            let moved = first_hop.min(second_hop);
            builder.reduce(&debtor, &middle, moved);
            builder.reduce(&middle, &creditor, moved);
            merge_debt(builder, &debtor, &creditor, moved);
            return true;
        }
    }
    false
}

/// Adds `amount` owed by `debtor` to `creditor`, netting it against any debt
/// already running the other way.
fn merge_debt(builder: &mut GraphBuilder, debtor: &str, creditor: &str, amount: Decimal) {
    if !builder.contains(creditor, debtor) {
        builder.add(debtor, creditor, amount);
        return;
    }

    let opposite = builder.get(creditor, debtor);
    if opposite > amount {
        builder.reduce(creditor, debtor, amount);
    } else if opposite < amount {
        builder.remove(creditor, debtor);
        builder.add(debtor, creditor, amount - opposite);
    } else {
        builder.remove(creditor, debtor);
    }
}
