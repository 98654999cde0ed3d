mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

/// Typed failure for lookups by id. Everything else surfaces as the
/// underlying rusqlite error wrapped with context.
#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
}

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    /// First-run seeding: the fixed default category set. Skipped entirely
    /// once any category exists, so user edits are never clobbered.
    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let defaults: &[(&str, &str, &str, TxnKind)] = &[
            ("Food", "🍔", "#FF5722", TxnKind::Expense),
            ("Transport", "🚗", "#2196F3", TxnKind::Expense),
            ("Entertainment", "🎉", "#9C27B0", TxnKind::Expense),
            ("Bills", "📄", "#F44336", TxnKind::Expense),
            ("Shopping", "🛍", "#E91E63", TxnKind::Expense),
            ("Health", "💊", "#00BCD4", TxnKind::Expense),
            ("Education", "📚", "#3F51B5", TxnKind::Expense),
            ("Other", "📦", "#607D8B", TxnKind::Expense),
            ("Salary", "💰", "#4CAF50", TxnKind::Income),
            ("Gift", "🎁", "#FFEB3B", TxnKind::Income),
            ("Freelance", "💼", "#009688", TxnKind::Income),
            ("Other", "💵", "#8BC34A", TxnKind::Income),
        ];

        let tx = self.conn.transaction()?;
        for (name, icon, color, kind) in defaults {
            tx.execute(
                "INSERT INTO categories (name, icon, color, kind) VALUES (?1, ?2, ?3, ?4)",
                params![name, icon, color, kind.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, txn: &Transaction) -> Result<i64> {
        match txn.id {
            // Explicit id: replace-by-id, last write wins
            Some(id) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO transactions (id, amount, description, category_id, kind, date, note)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        id,
                        txn.amount.to_string(),
                        txn.description,
                        txn.category_id,
                        txn.kind.as_str(),
                        txn.date,
                        txn.note,
                    ],
                )?;
            }
            None => {
                self.conn.execute(
                    "INSERT INTO transactions (amount, description, category_id, kind, date, note)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        txn.amount.to_string(),
                        txn.description,
                        txn.category_id,
                        txn.kind.as_str(),
                        txn.date,
                        txn.note,
                    ],
                )?;
            }
        }
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_transaction(&self, txn: &Transaction) -> Result<()> {
        let id = txn
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a transaction without an id"))?;
        let changed = self.conn.execute(
            "UPDATE transactions SET amount = ?1, description = ?2, category_id = ?3, kind = ?4, date = ?5, note = ?6
             WHERE id = ?7",
            params![
                txn.amount.to_string(),
                txn.description,
                txn.category_id,
                txn.kind.as_str(),
                txn.date,
                txn.note,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: "transaction",
                id,
            }
            .into());
        }
        Ok(())
    }

    /// No-op if the id is already absent.
    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn delete_all_transactions(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM transactions", [])?)
    }

    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category_id, kind, date, note
             FROM transactions ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], txn_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transactions_by_kind(&self, kind: TxnKind) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category_id, kind, date, note
             FROM transactions WHERE kind = ?1 ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], txn_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Inclusive on both ends, matching `BETWEEN`.
    pub(crate) fn get_transactions_by_date_range(
        &self,
        start: i64,
        end: i64,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category_id, kind, date, note
             FROM transactions WHERE date BETWEEN ?1 AND ?2 ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![start, end], txn_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transactions_by_category(&self, category_id: i64) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category_id, kind, date, note
             FROM transactions WHERE category_id = ?1 ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![category_id], txn_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Sum of amounts for one kind; zero for an empty set, never NULL.
    /// Summed in `Decimal`, not SQL, so amounts never round-trip through
    /// floats.
    pub(crate) fn total_by_kind(&self, kind: TxnKind) -> Result<Decimal> {
        let mut stmt = self
            .conn
            .prepare("SELECT amount FROM transactions WHERE kind = ?1")?;
        let rows = stmt.query_map(params![kind.as_str()], |row| row.get::<_, String>(0))?;
        let mut total = Decimal::ZERO;
        for amount in rows {
            total += Decimal::from_str(&amount?).unwrap_or_default();
        }
        Ok(total)
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, icon, color, kind FROM categories ORDER BY id")?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_categories_by_kind(&self, kind: TxnKind) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, icon, color, kind FROM categories WHERE kind = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![kind.as_str()], category_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        let result = self.conn.query_row(
            "SELECT id, name, icon, color, kind FROM categories WHERE id = ?1",
            params![id],
            category_from_row,
        );
        match result {
            Ok(c) => Ok(Some(c)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        match cat.id {
            Some(id) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO categories (id, name, icon, color, kind) VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![id, cat.name, cat.icon, cat.color, cat.kind.as_str()],
                )?;
            }
            None => {
                self.conn.execute(
                    "INSERT INTO categories (name, icon, color, kind) VALUES (?1, ?2, ?3, ?4)",
                    params![cat.name, cat.icon, cat.color, cat.kind.as_str()],
                )?;
            }
        }
        Ok(self.conn.last_insert_rowid())
    }

    /// No cascade: transactions keep their category_id and resolve to a
    /// fallback label at read time.
    pub(crate) fn delete_category(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Goals ─────────────────────────────────────────────────

    pub(crate) fn get_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, current_amount, deadline, icon, created_at
             FROM goals ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], goal_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Goals still short of their target, soonest deadline first
    /// (goals without a deadline sort first, SQLite's NULL ordering).
    pub(crate) fn get_active_goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, target_amount, current_amount, deadline, icon, created_at
             FROM goals WHERE CAST(current_amount AS REAL) < CAST(target_amount AS REAL)
             ORDER BY deadline ASC",
        )?;
        let rows = stmt.query_map([], goal_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_goal_by_id(&self, id: i64) -> Result<Option<Goal>> {
        let result = self.conn.query_row(
            "SELECT id, name, target_amount, current_amount, deadline, icon, created_at
             FROM goals WHERE id = ?1",
            params![id],
            goal_from_row,
        );
        match result {
            Ok(g) => Ok(Some(g)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn insert_goal(&self, goal: &Goal) -> Result<i64> {
        match goal.id {
            Some(id) => {
                self.conn.execute(
                    "INSERT OR REPLACE INTO goals (id, name, target_amount, current_amount, deadline, icon, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        id,
                        goal.name,
                        goal.target_amount.to_string(),
                        goal.current_amount.to_string(),
                        goal.deadline,
                        goal.icon,
                        goal.created_at,
                    ],
                )?;
            }
            None => {
                self.conn.execute(
                    "INSERT INTO goals (name, target_amount, current_amount, deadline, icon, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        goal.name,
                        goal.target_amount.to_string(),
                        goal.current_amount.to_string(),
                        goal.deadline,
                        goal.icon,
                        goal.created_at,
                    ],
                )?;
            }
        }
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_goal(&self, goal: &Goal) -> Result<()> {
        let id = goal
            .id
            .ok_or_else(|| anyhow::anyhow!("Cannot update a goal without an id"))?;
        let changed = self.conn.execute(
            "UPDATE goals SET name = ?1, target_amount = ?2, current_amount = ?3, deadline = ?4, icon = ?5, created_at = ?6
             WHERE id = ?7",
            params![
                goal.name,
                goal.target_amount.to_string(),
                goal.current_amount.to_string(),
                goal.deadline,
                goal.icon,
                goal.created_at,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound { entity: "goal", id }.into());
        }
        Ok(())
    }

    /// No-op if the id is already absent.
    pub(crate) fn delete_goal(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM goals WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn delete_all_goals(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM goals", [])?)
    }
}

// ── Row mapping ───────────────────────────────────────────────

fn txn_from_row(row: &Row) -> rusqlite::Result<Transaction> {
    let amount: String = row.get(1)?;
    let kind: String = row.get(4)?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        amount: Decimal::from_str(&amount).unwrap_or_default(),
        description: row.get(2)?,
        category_id: row.get(3)?,
        kind: TxnKind::parse(&kind),
        date: row.get(5)?,
        note: row.get(6)?,
    })
}

fn category_from_row(row: &Row) -> rusqlite::Result<Category> {
    let kind: String = row.get(4)?;
    Ok(Category {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
        kind: TxnKind::parse(&kind),
    })
}

fn goal_from_row(row: &Row) -> rusqlite::Result<Goal> {
    let target: String = row.get(2)?;
    let current: String = row.get(3)?;
    Ok(Goal {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        target_amount: Decimal::from_str(&target).unwrap_or_default(),
        current_amount: Decimal::from_str(&current).unwrap_or_default(),
        deadline: row.get(4)?,
        icon: row.get(5)?,
        created_at: row.get(6)?,
    })
}
