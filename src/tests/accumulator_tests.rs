use crate::core::accumulator::accumulate;
use crate::tests::{expense, graph, no_expenses, no_payments, payment};
use rust_decimal_macros::dec;

#[test]
fn test_single_payer_split_between_two_debtors() {
    let _ = env_logger::try_init();
    let expenses = vec![expense(
        "e1",
        &[("U1", dec!(100))],
        &[("U2", dec!(50)), ("U3", dec!(50))],
    )];

    let result = accumulate(&expenses, &no_payments());

    assert_eq!(
        result.graph,
        graph(&[("U2", "U1", dec!(50)), ("U3", "U1", dec!(50))])
    );
    assert!(result.settleable.is_empty());
    assert_eq!(result.active.expense_ids, vec!["e1".to_string()]);
}

#[test]
fn test_empty_inputs_give_empty_graph_without_settle_signal() {
    let result = accumulate(&no_expenses(), &no_payments());

    assert!(result.graph.is_empty());
    assert!(result.settleable.is_empty());
    assert!(result.active.is_empty());
}

#[test]
fn test_payer_share_of_own_expense_is_not_a_debt() {
    let expenses = vec![expense(
        "e1",
        &[("U1", dec!(100))],
        &[("U1", dec!(50)), ("U2", dec!(50))],
    )];

    let result = accumulate(&expenses, &no_payments());

    assert_eq!(result.graph, graph(&[("U2", "U1", dec!(50))]));
    assert_eq!(result.graph.get("U1", "U1"), dec!(0));
}

#[test]
fn test_deleted_and_settled_records_are_ignored() {
    let mut deleted = expense("e1", &[("U1", dec!(40))], &[("U2", dec!(40))]);
    deleted.deleted = true;
    let mut settled = expense("e2", &[("U1", dec!(60))], &[("U3", dec!(60))]);
    settled.settled = true;
    let live = expense("e3", &[("U2", dec!(10))], &[("U3", dec!(10))]);
    let mut settled_payment = payment("p1", "U3", "U2", dec!(10));
    settled_payment.settled = true;

    let result = accumulate(&[deleted, settled, live], &[settled_payment]);

    assert_eq!(result.graph, graph(&[("U3", "U2", dec!(10))]));
    assert_eq!(result.active.expense_ids, vec!["e3".to_string()]);
    assert!(result.active.payment_ids.is_empty());
}

#[test]
fn test_zero_amount_expense_adds_no_edges() {
    let expenses = vec![expense("e1", &[("U1", dec!(0))], &[("U2", dec!(0))])];

    let result = accumulate(&expenses, &no_payments());

    assert!(result.graph.is_empty());
    // Still an active record, so the batch counts as settled.
    assert_eq!(result.settleable.expense_ids, vec!["e1".to_string()]);
}

#[test]
fn test_each_payer_is_charged_the_full_debtor_share() {
    let expenses = vec![expense(
        "e1",
        &[("U1", dec!(50)), ("U2", dec!(50))],
        &[("U3", dec!(100))],
    )];

    let result = accumulate(&expenses, &no_payments());

    assert_eq!(
        result.graph,
        graph(&[("U3", "U1", dec!(100)), ("U3", "U2", dec!(100))])
    );
}

#[test]
fn test_payment_to_someone_who_owes_the_sender_increases_their_debt() {
    // U1 owes U2 30, then U2 hands U1 another 10.
    let expenses = vec![expense("e1", &[("U2", dec!(30))], &[("U1", dec!(30))])];
    let payments = vec![payment("p1", "U2", "U1", dec!(10))];

    let result = accumulate(&expenses, &payments);

    assert_eq!(result.graph, graph(&[("U1", "U2", dec!(40))]));
}

#[test]
fn test_partial_repayment_reduces_debt() {
    let expenses = vec![expense("e1", &[("U2", dec!(30))], &[("U1", dec!(30))])];
    let payments = vec![payment("p1", "U1", "U2", dec!(10))];

    let result = accumulate(&expenses, &payments);

    assert_eq!(result.graph, graph(&[("U1", "U2", dec!(20))]));
    assert!(result.settleable.is_empty());
}

#[test]
fn test_overpayment_flips_the_debt() {
    let expenses = vec![expense("e1", &[("U2", dec!(30))], &[("U1", dec!(30))])];
    let payments = vec![payment("p1", "U1", "U2", dec!(50))];

    let result = accumulate(&expenses, &payments);

    assert_eq!(result.graph, graph(&[("U2", "U1", dec!(20))]));
}

#[test]
fn test_repayment_leaving_a_cent_clears_the_debt() {
    let expenses = vec![expense("e1", &[("U2", dec!(30))], &[("U1", dec!(30))])];
    let payments = vec![payment("p1", "U1", "U2", dec!(29.99))];

    let result = accumulate(&expenses, &payments);

    assert!(result.graph.is_empty());
    assert_eq!(result.settleable.expense_ids, vec!["e1".to_string()]);
    assert_eq!(result.settleable.payment_ids, vec!["p1".to_string()]);
}

#[test]
fn test_payment_without_prior_debt_is_an_advance() {
    let payments = vec![payment("p1", "U1", "U2", dec!(25))];

    let result = accumulate(&no_expenses(), &payments);

    assert_eq!(result.graph, graph(&[("U2", "U1", dec!(25))]));
    assert!(result.settleable.is_empty());
}

#[test]
fn test_full_repayment_signals_settlement() {
    let expenses = vec![expense("e1", &[("U1", dec!(100))], &[("U2", dec!(100))])];
    let payments = vec![payment("p1", "U2", "U1", dec!(100))];

    let result = accumulate(&expenses, &payments);

    assert!(result.graph.is_empty());
    assert_eq!(result.settleable, result.active);
    assert_eq!(result.settleable.expense_ids, vec!["e1".to_string()]);
    assert_eq!(result.settleable.payment_ids, vec!["p1".to_string()]);
}

#[test]
fn test_cents_are_neither_lost_nor_created() {
    let expenses = vec![expense(
        "e1",
        &[("P", dec!(33.33))],
        &[("D1", dec!(11.11)), ("D2", dec!(11.11)), ("D3", dec!(11.11))],
    )];

    let result = accumulate(&expenses, &no_payments());

    for debt in result.graph.debts() {
        assert_eq!(debt.creditor, "P");
        assert_eq!(debt.amount, dec!(11.11));
    }
    assert_eq!(result.graph.edge_count(), 3);
    assert_eq!(result.graph.total(), dec!(33.33));
}

#[test]
fn test_edges_are_rounded_to_cents() {
    let expenses = vec![
        expense("e1", &[("U1", dec!(10.004))], &[("U2", dec!(10.004))]),
        expense("e2", &[("U1", dec!(0.001))], &[("U2", dec!(0.001))]),
    ];

    let result = accumulate(&expenses, &no_payments());

    assert_eq!(result.graph.get("U2", "U1"), dec!(10.01));
}

#[test]
fn test_expenses_in_both_directions_keep_both_edges() {
    let expenses = vec![
        expense("e1", &[("U1", dec!(60))], &[("U2", dec!(60))]),
        expense("e2", &[("U2", dec!(40))], &[("U1", dec!(40))]),
    ];

    let result = accumulate(&expenses, &no_payments());

    assert_eq!(
        result.graph,
        graph(&[("U2", "U1", dec!(60)), ("U1", "U2", dec!(40))])
    );
}
