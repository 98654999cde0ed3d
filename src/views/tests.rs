#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::Goal;
use crate::repo::Repos;
use rust_decimal_macros::dec;
use std::sync::Arc;

// 2023-12-01, 2024-01-01, 2024-02-01, 2024-09-01, 2024-10-01 (UTC)
const DEC_2023: i64 = 1_701_388_800_000;
const JAN_2024: i64 = 1_704_067_200_000;
const FEB_2024: i64 = 1_706_745_600_000;
const SEP_2024: i64 = 1_725_148_800_000;
const OCT_2024: i64 = 1_727_740_800_000;

fn txn(amount: Decimal, category_id: i64, kind: TxnKind, date: i64) -> Transaction {
    Transaction::new(amount, "test".to_string(), category_id, kind, date)
}

fn cat(id: i64, name: &str) -> Category {
    Category {
        id: Some(id),
        name: name.to_string(),
        icon: String::new(),
        color: String::new(),
        kind: TxnKind::Expense,
    }
}

// ── MonthKey ──────────────────────────────────────────────────

#[test]
fn test_month_key_from_millis_utc() {
    assert_eq!(
        MonthKey::from_millis(JAN_2024),
        MonthKey {
            year: 2024,
            month: 1
        }
    );
    assert_eq!(
        MonthKey::from_millis(SEP_2024),
        MonthKey {
            year: 2024,
            month: 9
        }
    );
    // One millisecond before a month boundary stays in the old month
    assert_eq!(
        MonthKey::from_millis(FEB_2024 - 1),
        MonthKey {
            year: 2024,
            month: 1
        }
    );
}

#[test]
fn test_month_key_orders_chronologically() {
    // September before October: the whole point of a typed key over
    // lexicographic "9/2024" vs "10/2024"
    let sep = MonthKey::from_millis(SEP_2024);
    let oct = MonthKey::from_millis(OCT_2024);
    assert!(sep < oct);

    // Year takes precedence over month
    let dec23 = MonthKey::from_millis(DEC_2023);
    let jan24 = MonthKey::from_millis(JAN_2024);
    assert!(dec23 < jan24);
}

#[test]
fn test_month_key_display_zero_padded() {
    assert_eq!(MonthKey::from_millis(SEP_2024).to_string(), "09/2024");
    assert_eq!(MonthKey::from_millis(OCT_2024).to_string(), "10/2024");
}

// ── expenses_by_category (pure) ───────────────────────────────

#[test]
fn test_category_grouping_sums_per_category() {
    let cats = vec![cat(1, "Food"), cat(2, "Transport")];
    // Scenario: two expenses in the same category merge into one entry
    let txns = vec![
        txn(dec!(30), 1, TxnKind::Expense, JAN_2024),
        txn(dec!(70), 1, TxnKind::Expense, FEB_2024),
    ];

    let grouped = expenses_by_category(&txns, &cats);
    assert_eq!(grouped, vec![("Food".to_string(), dec!(100))]);
}

#[test]
fn test_category_grouping_first_occurrence_order() {
    let cats = vec![cat(1, "Food"), cat(2, "Transport"), cat(3, "Fun")];
    let txns = vec![
        txn(dec!(5), 2, TxnKind::Expense, JAN_2024),
        txn(dec!(500), 3, TxnKind::Expense, JAN_2024),
        txn(dec!(50), 1, TxnKind::Expense, JAN_2024),
        txn(dec!(5), 2, TxnKind::Expense, FEB_2024),
    ];

    let grouped = expenses_by_category(&txns, &cats);
    // Insertion order of first occurrence, not sorted by amount
    let labels: Vec<&str> = grouped.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["Transport", "Fun", "Food"]);
    assert_eq!(grouped[0].1, dec!(10));
}

#[test]
fn test_category_grouping_excludes_income() {
    let cats = vec![cat(1, "Food")];
    let txns = vec![
        txn(dec!(30), 1, TxnKind::Expense, JAN_2024),
        txn(dec!(1000), 1, TxnKind::Income, JAN_2024),
    ];

    let grouped = expenses_by_category(&txns, &cats);
    assert_eq!(grouped, vec![("Food".to_string(), dec!(30))]);
}

#[test]
fn test_category_grouping_dangling_reference_falls_back() {
    let cats = vec![cat(1, "Food")];
    let txns = vec![txn(dec!(25), 999, TxnKind::Expense, JAN_2024)];

    let grouped = expenses_by_category(&txns, &cats);
    assert_eq!(grouped, vec![(UNKNOWN_CATEGORY.to_string(), dec!(25))]);
}

#[test]
fn test_category_grouping_merges_colliding_labels() {
    // Two different dangling ids both resolve to the fallback label and
    // merge instead of shadowing each other
    let txns = vec![
        txn(dec!(10), 998, TxnKind::Expense, JAN_2024),
        txn(dec!(15), 999, TxnKind::Expense, JAN_2024),
    ];

    let grouped = expenses_by_category(&txns, &[]);
    assert_eq!(grouped, vec![(UNKNOWN_CATEGORY.to_string(), dec!(25))]);
}

#[test]
fn test_category_grouping_empty_input() {
    assert!(expenses_by_category(&[], &[]).is_empty());
}

// ── monthly_expenses (pure) ───────────────────────────────────

#[test]
fn test_monthly_grouping_ordered_buckets() {
    // Scenario: expenses in two months come out as two ordered buckets
    let txns = vec![
        txn(dec!(150), 1, TxnKind::Expense, FEB_2024),
        txn(dec!(50), 1, TxnKind::Expense, JAN_2024),
    ];

    let monthly = monthly_expenses(&txns);
    assert_eq!(
        monthly,
        vec![
            (MonthKey { year: 2024, month: 1 }, dec!(50)),
            (MonthKey { year: 2024, month: 2 }, dec!(150)),
        ]
    );
}

#[test]
fn test_monthly_grouping_september_before_october() {
    let txns = vec![
        txn(dec!(1), 1, TxnKind::Expense, OCT_2024),
        txn(dec!(2), 1, TxnKind::Expense, SEP_2024),
    ];

    let monthly = monthly_expenses(&txns);
    assert_eq!(monthly[0].0.month, 9);
    assert_eq!(monthly[1].0.month, 10);
}

#[test]
fn test_monthly_grouping_sums_within_bucket() {
    let txns = vec![
        txn(dec!(10), 1, TxnKind::Expense, JAN_2024),
        txn(dec!(20), 2, TxnKind::Expense, JAN_2024 + 86_400_000),
    ];

    let monthly = monthly_expenses(&txns);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].1, dec!(30));
}

#[test]
fn test_monthly_grouping_excludes_income() {
    let txns = vec![txn(dec!(1000), 9, TxnKind::Income, JAN_2024)];
    assert!(monthly_expenses(&txns).is_empty());
}

// ── Live views over the store ─────────────────────────────────

fn setup() -> (Arc<crate::store::Store>, Repos, Views) {
    let store = Arc::new(crate::store::Store::open_in_memory().unwrap());
    let repos = Repos::new(store.clone());
    let views = Views::new(&store).unwrap();
    (store, repos, views)
}

#[test]
fn test_balance_starts_at_zero() {
    let (_store, _repos, views) = setup();
    assert_eq!(views.balance.get(), Decimal::ZERO);
    assert_eq!(views.total_income.get(), Decimal::ZERO);
    assert_eq!(views.total_expense.get(), Decimal::ZERO);
}

#[test]
fn test_balance_income_minus_expense() {
    // Scenario: +100 income, then 40 expense, balance settles at 60
    let (store, repos, mut views) = setup();

    repos
        .transactions
        .insert(txn(dec!(100), 9, TxnKind::Income, JAN_2024))
        .unwrap();
    repos
        .transactions
        .insert(txn(dec!(40), 1, TxnKind::Expense, JAN_2024))
        .unwrap();
    store.sync().unwrap();

    assert_eq!(views.balance.latest(), dec!(60));
    assert_eq!(views.total_income.latest(), dec!(100));
    assert_eq!(views.total_expense.latest(), dec!(40));
}

#[test]
fn test_balance_with_one_empty_side() {
    let (store, repos, mut views) = setup();

    repos
        .transactions
        .insert(txn(dec!(75), 1, TxnKind::Expense, JAN_2024))
        .unwrap();
    store.sync().unwrap();
    assert_eq!(views.balance.latest(), dec!(-75));

    repos.transactions.delete_all().unwrap();
    repos
        .transactions
        .insert(txn(dec!(120), 9, TxnKind::Income, JAN_2024))
        .unwrap();
    store.sync().unwrap();
    assert_eq!(views.balance.latest(), dec!(120));
}

#[test]
fn test_category_view_resolves_seeded_names() {
    let (store, repos, mut views) = setup();

    // Seeded ids: 1 = Food, 2 = Transport
    repos
        .transactions
        .insert(txn(dec!(30), 1, TxnKind::Expense, JAN_2024))
        .unwrap();
    repos
        .transactions
        .insert(txn(dec!(70), 1, TxnKind::Expense, FEB_2024))
        .unwrap();
    repos
        .transactions
        .insert(txn(dec!(12), 2, TxnKind::Expense, FEB_2024))
        .unwrap();
    store.sync().unwrap();

    let grouped = views.expenses_by_category.latest();
    assert_eq!(grouped.len(), 2);
    assert!(grouped.contains(&("Food".to_string(), dec!(100))));
    assert!(grouped.contains(&("Transport".to_string(), dec!(12))));
}

#[test]
fn test_category_view_updates_when_category_deleted() {
    let (store, repos, mut views) = setup();

    repos
        .transactions
        .insert(txn(dec!(30), 1, TxnKind::Expense, JAN_2024))
        .unwrap();
    store.sync().unwrap();
    assert_eq!(
        views.expenses_by_category.latest(),
        vec![("Food".to_string(), dec!(30))]
    );

    // Deleting the category re-derives the view with the fallback label
    repos.categories.delete(1).unwrap();
    store.sync().unwrap();
    assert_eq!(
        views.expenses_by_category.latest(),
        vec![(UNKNOWN_CATEGORY.to_string(), dec!(30))]
    );
}

#[test]
fn test_monthly_view_ordered() {
    let (store, repos, mut views) = setup();

    repos
        .transactions
        .insert(txn(dec!(150), 1, TxnKind::Expense, FEB_2024))
        .unwrap();
    repos
        .transactions
        .insert(txn(dec!(50), 1, TxnKind::Expense, JAN_2024))
        .unwrap();
    store.sync().unwrap();

    let monthly = views.monthly_expenses.latest();
    assert_eq!(
        monthly,
        vec![
            (MonthKey { year: 2024, month: 1 }, dec!(50)),
            (MonthKey { year: 2024, month: 2 }, dec!(150)),
        ]
    );
}

#[test]
fn test_insert_then_delete_restores_all_views() {
    let (store, repos, mut views) = setup();

    repos
        .transactions
        .insert(txn(dec!(100), 9, TxnKind::Income, JAN_2024))
        .unwrap();
    store.sync().unwrap();

    let balance_before = views.balance.latest();
    let by_category_before = views.expenses_by_category.latest();
    let monthly_before = views.monthly_expenses.latest();

    let id = repos
        .transactions
        .insert(txn(dec!(33.33), 1, TxnKind::Expense, FEB_2024))
        .unwrap();
    store.sync().unwrap();
    assert_ne!(views.balance.latest(), balance_before);

    repos.transactions.delete(id).unwrap();
    store.sync().unwrap();

    assert_eq!(views.balance.latest(), balance_before);
    assert_eq!(views.expenses_by_category.latest(), by_category_before);
    assert_eq!(views.monthly_expenses.latest(), monthly_before);
}

#[test]
fn test_goal_progress_through_repo_round_trip() {
    // Scenario: goal at 150/200 is active; topping it up to the target
    // removes it from the active view
    let (store, repos, _views) = setup();
    let mut active = repos.goals.watch_active().unwrap();

    let mut goal = Goal::new("Laptop".into(), dec!(200), None);
    goal.current_amount = dec!(150);
    let id = repos.goals.insert(goal).unwrap();
    store.sync().unwrap();

    let snapshot = active.latest();
    assert_eq!(snapshot.len(), 1);
    assert!((snapshot[0].progress() - 0.75).abs() < 1e-9);

    let mut updated = repos.goals.get(id).unwrap().unwrap();
    updated.current_amount = dec!(200);
    repos.goals.update(updated).unwrap();
    store.sync().unwrap();

    assert!(active.latest().is_empty());
}
