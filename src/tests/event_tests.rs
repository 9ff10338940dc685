use crate::core::models::{Event, EventState};
use crate::tests::{expense, graph, payment};
use rust_decimal_macros::dec;

fn dinner_event() -> Event {
    Event::new("ev1", "Dinner")
        .add_expense(expense("e1", &[("U1", dec!(60))], &[("U2", dec!(60))]))
        .add_expense(expense("e2", &[("U2", dec!(40))], &[("U1", dec!(40))]))
}

#[test]
fn test_new_event_is_active_and_owes_nothing() {
    let event = Event::new("ev1", "Dinner");

    assert_eq!(event.state(), EventState::Active);
    assert!(event.current_debts.is_empty());
    assert!(event.settled_at.is_none());
    assert!(event.can_settle(true));
}

#[test]
fn test_adding_records_tags_them_and_recomputes_debts() {
    let event = Event::new("ev1", "Dinner")
        .add_expense(expense("e1", &[("U1", dec!(100))], &[("U2", dec!(50)), ("U3", dec!(50))]));

    assert_eq!(event.expenses["e1"].event_id.as_deref(), Some("ev1"));
    assert_eq!(
        event.current_debts,
        graph(&[("U2", "U1", dec!(50)), ("U3", "U1", dec!(50))])
    );

    let event = event.add_payment(payment("p1", "U2", "U1", dec!(50)));

    assert_eq!(event.payments["p1"].event_id.as_deref(), Some("ev1"));
    assert_eq!(event.current_debts, graph(&[("U3", "U1", dec!(50))]));
}

#[test]
fn test_current_debts_are_not_simplified() {
    let event = dinner_event();

    assert_eq!(event.current_debts.edge_count(), 2);
    assert_eq!(event.compute_debts(false), event.current_debts);
    assert_eq!(event.compute_debts(true), graph(&[("U2", "U1", dec!(20))]));
}

#[test]
fn test_can_settle_once_debts_are_repaid() {
    let event = dinner_event();
    assert!(!event.can_settle(true));

    let event = event.add_payment(payment("p1", "U2", "U1", dec!(20)));

    assert!(event.can_settle(true));
}

#[test]
fn test_settle_keeps_final_balances() {
    let event = dinner_event().settle();

    assert_eq!(event.state(), EventState::Settled);
    assert!(event.settled);
    assert!(event.settled_at.is_some());
    assert_eq!(event.current_debts.edge_count(), 2);
}

#[test]
fn test_reopen_recomputes_debts() {
    let mut event = dinner_event().settle();
    if let Some(expense) = event.expenses.get_mut("e2") {
        expense.deleted = true;
    }

    let event = event.reopen();

    assert_eq!(event.state(), EventState::Active);
    assert!(event.settled_at.is_none());
    assert_eq!(event.current_debts, graph(&[("U2", "U1", dec!(60))]));
}

#[test]
fn test_removing_records_recomputes_debts() {
    let event = dinner_event()
        .add_payment(payment("p1", "U1", "U2", dec!(10)))
        .remove_expense("e1");

    assert!(!event.expenses.contains_key("e1"));
    assert_eq!(event.current_debts, graph(&[("U1", "U2", dec!(30))]));

    let event = event.remove_payment("p1");

    assert_eq!(event.current_debts, graph(&[("U1", "U2", dec!(40))]));
}

#[test]
fn test_removing_unknown_records_changes_nothing() {
    let event = dinner_event();

    let after = event.clone().remove_expense("missing").remove_payment("missing");

    assert_eq!(after, event);
}
