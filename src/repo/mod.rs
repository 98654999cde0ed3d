//! Thin typed facades over the store: one per record kind, no business
//! logic. Store errors propagate unchanged.

use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::models::{Category, Goal, Transaction, TxnKind};
use crate::store::{Live, Store, Table};

pub(crate) struct TransactionRepo {
    store: Arc<Store>,
}

impl TransactionRepo {
    pub(crate) fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All transactions, newest first.
    pub(crate) fn watch_all(&self) -> Result<Live<Vec<Transaction>>> {
        self.store
            .watch(&[Table::Transactions], |db| db.get_transactions())
    }

    pub(crate) fn watch_by_kind(&self, kind: TxnKind) -> Result<Live<Vec<Transaction>>> {
        self.store
            .watch(&[Table::Transactions], move |db| {
                db.get_transactions_by_kind(kind)
            })
    }

    pub(crate) fn watch_by_date_range(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Live<Vec<Transaction>>> {
        self.store.watch(&[Table::Transactions], move |db| {
            db.get_transactions_by_date_range(start, end)
        })
    }

    pub(crate) fn watch_by_category(&self, category_id: i64) -> Result<Live<Vec<Transaction>>> {
        self.store.watch(&[Table::Transactions], move |db| {
            db.get_transactions_by_category(category_id)
        })
    }

    /// Live sum of amounts for one kind; zero when no records match.
    pub(crate) fn watch_total(&self, kind: TxnKind) -> Result<Live<Decimal>> {
        self.store
            .watch(&[Table::Transactions], move |db| db.total_by_kind(kind))
    }

    pub(crate) fn all(&self) -> Result<Vec<Transaction>> {
        self.store.query(|db| db.get_transactions())
    }

    pub(crate) fn count(&self) -> Result<i64> {
        self.store.query(|db| db.get_transaction_count())
    }

    pub(crate) fn insert(&self, txn: Transaction) -> Result<i64> {
        self.store
            .exec(&[Table::Transactions], move |db| db.insert_transaction(&txn))
    }

    pub(crate) fn update(&self, txn: Transaction) -> Result<()> {
        self.store
            .exec(&[Table::Transactions], move |db| db.update_transaction(&txn))
    }

    pub(crate) fn delete(&self, id: i64) -> Result<()> {
        self.store
            .exec(&[Table::Transactions], move |db| db.delete_transaction(id))
    }

    pub(crate) fn delete_all(&self) -> Result<usize> {
        self.store
            .exec(&[Table::Transactions], |db| db.delete_all_transactions())
    }
}

pub(crate) struct CategoryRepo {
    store: Arc<Store>,
}

impl CategoryRepo {
    pub(crate) fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub(crate) fn watch_all(&self) -> Result<Live<Vec<Category>>> {
        self.store
            .watch(&[Table::Categories], |db| db.get_categories())
    }

    pub(crate) fn watch_by_kind(&self, kind: TxnKind) -> Result<Live<Vec<Category>>> {
        self.store
            .watch(&[Table::Categories], move |db| {
                db.get_categories_by_kind(kind)
            })
    }

    pub(crate) fn all(&self) -> Result<Vec<Category>> {
        self.store.query(|db| db.get_categories())
    }

    pub(crate) fn get(&self, id: i64) -> Result<Option<Category>> {
        self.store.query(move |db| db.get_category_by_id(id))
    }

    pub(crate) fn insert(&self, cat: Category) -> Result<i64> {
        self.store
            .exec(&[Table::Categories], move |db| db.insert_category(&cat))
    }

    pub(crate) fn delete(&self, id: i64) -> Result<()> {
        self.store
            .exec(&[Table::Categories], move |db| db.delete_category(id))
    }
}

pub(crate) struct GoalRepo {
    store: Arc<Store>,
}

impl GoalRepo {
    pub(crate) fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All goals, newest first.
    pub(crate) fn watch_all(&self) -> Result<Live<Vec<Goal>>> {
        self.store.watch(&[Table::Goals], |db| db.get_goals())
    }

    /// Goals still short of their target.
    pub(crate) fn watch_active(&self) -> Result<Live<Vec<Goal>>> {
        self.store.watch(&[Table::Goals], |db| db.get_active_goals())
    }

    pub(crate) fn all(&self) -> Result<Vec<Goal>> {
        self.store.query(|db| db.get_goals())
    }

    pub(crate) fn get(&self, id: i64) -> Result<Option<Goal>> {
        self.store.query(move |db| db.get_goal_by_id(id))
    }

    pub(crate) fn insert(&self, goal: Goal) -> Result<i64> {
        self.store.exec(&[Table::Goals], move |db| db.insert_goal(&goal))
    }

    pub(crate) fn update(&self, goal: Goal) -> Result<()> {
        self.store.exec(&[Table::Goals], move |db| db.update_goal(&goal))
    }

    pub(crate) fn delete(&self, id: i64) -> Result<()> {
        self.store.exec(&[Table::Goals], move |db| db.delete_goal(id))
    }

    pub(crate) fn delete_all(&self) -> Result<usize> {
        self.store.exec(&[Table::Goals], |db| db.delete_all_goals())
    }
}

/// The three facades bundled, sharing one store.
pub(crate) struct Repos {
    pub transactions: TransactionRepo,
    pub categories: CategoryRepo,
    pub goals: GoalRepo,
}

impl Repos {
    pub(crate) fn new(store: Arc<Store>) -> Self {
        Self {
            transactions: TransactionRepo::new(store.clone()),
            categories: CategoryRepo::new(store.clone()),
            goals: GoalRepo::new(store),
        }
    }
}
