//! Derived financial views: balance, totals, category breakdown, monthly
//! trend. Each view is a pure derivation over a snapshot of the record
//! lists, registered as a live query so it stays current as records
//! change.

use anyhow::Result;
use chrono::{DateTime, Datelike};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Category, Transaction, TxnKind};
use crate::store::{Live, Store, Table};

/// Label shown for transactions whose category no longer exists.
pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// Calendar month bucket, split in UTC so bucket boundaries are the same
/// on every machine. Ordered numerically by (year, month), not by label
/// text, so September sorts before October.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub(crate) fn from_millis(ms: i64) -> Self {
        let dt = DateTime::from_timestamp_millis(ms).unwrap_or_default();
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Expense totals grouped by category label, in first-occurrence order of
/// the filtered transactions (a stable single-pass group-by; no re-sort
/// by value). Dangling category references resolve to [`UNKNOWN_CATEGORY`];
/// groups resolving to the same label merge.
pub(crate) fn expenses_by_category(
    txns: &[Transaction],
    categories: &[Category],
) -> Vec<(String, Decimal)> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, Decimal> = HashMap::new();
    for txn in txns.iter().filter(|t| t.is_expense()) {
        let label = Category::find_by_id(categories, txn.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        match sums.entry(label.clone()) {
            std::collections::hash_map::Entry::Occupied(mut e) => *e.get_mut() += txn.amount,
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(txn.amount);
                order.push(label);
            }
        }
    }
    order
        .into_iter()
        .map(|label| {
            let sum = sums.remove(&label).unwrap_or_default();
            (label, sum)
        })
        .collect()
}

/// Expense totals bucketed by UTC calendar month, oldest bucket first.
pub(crate) fn monthly_expenses(txns: &[Transaction]) -> Vec<(MonthKey, Decimal)> {
    let mut buckets: BTreeMap<MonthKey, Decimal> = BTreeMap::new();
    for txn in txns.iter().filter(|t| t.is_expense()) {
        *buckets
            .entry(MonthKey::from_millis(txn.date))
            .or_insert(Decimal::ZERO) += txn.amount;
    }
    buckets.into_iter().collect()
}

/// Live handles for every derived view the screens consume.
pub(crate) struct Views {
    pub balance: Live<Decimal>,
    pub total_income: Live<Decimal>,
    pub total_expense: Live<Decimal>,
    pub expenses_by_category: Live<Vec<(String, Decimal)>>,
    pub monthly_expenses: Live<Vec<(MonthKey, Decimal)>>,
}

impl Views {
    pub(crate) fn new(store: &Store) -> Result<Self> {
        // Both totals are read in the same snapshot, so the balance can
        // never pair an old income total with a new expense total.
        let balance = store.watch(&[Table::Transactions], |db| {
            Ok(db.total_by_kind(TxnKind::Income)? - db.total_by_kind(TxnKind::Expense)?)
        })?;
        let total_income =
            store.watch(&[Table::Transactions], |db| db.total_by_kind(TxnKind::Income))?;
        let total_expense = store.watch(&[Table::Transactions], |db| {
            db.total_by_kind(TxnKind::Expense)
        })?;
        let by_category = store.watch(&[Table::Transactions, Table::Categories], |db| {
            let txns = db.get_transactions()?;
            let categories = db.get_categories()?;
            Ok(expenses_by_category(&txns, &categories))
        })?;
        let monthly = store.watch(&[Table::Transactions], |db| {
            Ok(monthly_expenses(&db.get_transactions()?))
        })?;

        Ok(Self {
            balance,
            total_income,
            total_expense,
            expenses_by_category: by_category,
            monthly_expenses: monthly,
        })
    }
}

#[cfg(test)]
mod tests;
