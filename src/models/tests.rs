#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ── TxnKind ───────────────────────────────────────────────────

#[test]
fn test_kind_round_trip() {
    for kind in TxnKind::all() {
        assert_eq!(TxnKind::parse(kind.as_str()), *kind);
    }
}

#[test]
fn test_kind_parse_case_insensitive() {
    assert_eq!(TxnKind::parse("Income"), TxnKind::Income);
    assert_eq!(TxnKind::parse("EXPENSE"), TxnKind::Expense);
}

#[test]
fn test_kind_parse_unknown_defaults_to_expense() {
    assert_eq!(TxnKind::parse("transfer"), TxnKind::Expense);
    assert_eq!(TxnKind::parse(""), TxnKind::Expense);
}

#[test]
fn test_kind_display() {
    assert_eq!(TxnKind::Income.to_string(), "income");
    assert_eq!(TxnKind::Expense.to_string(), "expense");
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_new_defaults() {
    let txn = Transaction::new(dec!(12.50), "Lunch".into(), 1, TxnKind::Expense, 1000);
    assert_eq!(txn.id, None);
    assert_eq!(txn.note, None);
    assert!(txn.is_expense());
    assert!(!txn.is_income());
}

#[test]
fn test_signed_amount() {
    let income = Transaction::new(dec!(100), "Pay".into(), 9, TxnKind::Income, 0);
    let expense = Transaction::new(dec!(40), "Food".into(), 1, TxnKind::Expense, 0);
    assert_eq!(income.signed_amount(), dec!(100));
    assert_eq!(expense.signed_amount(), dec!(-40));
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_find_by_id() {
    let cats = vec![
        Category {
            id: Some(1),
            name: "Food".into(),
            icon: "🍔".into(),
            color: "#FF5722".into(),
            kind: TxnKind::Expense,
        },
        Category {
            id: Some(2),
            name: "Salary".into(),
            icon: "💰".into(),
            color: "#4CAF50".into(),
            kind: TxnKind::Income,
        },
    ];
    assert_eq!(Category::find_by_id(&cats, 2).unwrap().name, "Salary");
    assert!(Category::find_by_id(&cats, 99).is_none());
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    let cats = vec![Category::new(
        "Transport".into(),
        "🚗".into(),
        "#2196F3".into(),
        TxnKind::Expense,
    )];
    assert!(Category::find_by_name(&cats, "transport").is_some());
    assert!(Category::find_by_name(&cats, "TRANSPORT").is_some());
    assert!(Category::find_by_name(&cats, "Trains").is_none());
}

// ── Goal ──────────────────────────────────────────────────────

#[test]
fn test_goal_new_defaults() {
    let goal = Goal::new("Vacation".into(), dec!(5000), None);
    assert_eq!(goal.current_amount, Decimal::ZERO);
    assert_eq!(goal.icon, DEFAULT_GOAL_ICON);
    assert!(goal.created_at > 0);
    assert!(goal.is_active());
}

#[test]
fn test_goal_progress_halfway() {
    let mut goal = Goal::new("Laptop".into(), dec!(200), None);
    goal.current_amount = dec!(50);
    assert!((goal.progress() - 0.25).abs() < 1e-9);
    goal.current_amount = dec!(100);
    assert!((goal.progress() - 0.5).abs() < 1e-9);
}

#[test]
fn test_goal_progress_monotonic() {
    let mut goal = Goal::new("Fund".into(), dec!(1000), None);
    let mut last = goal.progress();
    for step in [dec!(100), dec!(250), dec!(600), dec!(999), dec!(1000)] {
        goal.current_amount = step;
        let p = goal.progress();
        assert!(p >= last);
        last = p;
    }
}

#[test]
fn test_goal_progress_clamped_at_one() {
    let mut goal = Goal::new("Phone".into(), dec!(100), None);
    goal.current_amount = dec!(200);
    assert_eq!(goal.progress(), 1.0);
}

#[test]
fn test_goal_progress_zero_target() {
    let goal = Goal::new("Broken".into(), Decimal::ZERO, None);
    assert_eq!(goal.progress(), 0.0);

    let negative = Goal::new("Worse".into(), dec!(-10), None);
    assert_eq!(negative.progress(), 0.0);
}

#[test]
fn test_goal_active_boundary() {
    let mut goal = Goal::new("Exact".into(), dec!(200), None);
    goal.current_amount = dec!(199.99);
    assert!(goal.is_active());
    goal.current_amount = dec!(200);
    assert!(!goal.is_active());
    goal.current_amount = dec!(250);
    assert!(!goal.is_active());
}
