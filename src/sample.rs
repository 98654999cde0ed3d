//! Hardcoded demo data for trying the app out, spread over the last
//! 30 days so the monthly trend and dashboards have something to show.

use anyhow::Result;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::models::{Goal, Transaction, TxnKind};
use crate::repo::Repos;

// (description, amount in cents, seeded category id)
// Expense categories seed as ids 1-8, income as 9-12.
const SAMPLE_EXPENSES: &[(&str, i64, i64)] = &[
    ("Grocery shopping", 35_50, 1),
    ("Fuel", 40_00, 2),
    ("Cinema tickets", 12_00, 3),
    ("Electricity bill", 55_00, 4),
    ("New clothes", 80_00, 5),
    ("Pharmacy", 25_00, 6),
    ("Books", 30_00, 7),
    ("Coffee shop", 8_00, 3),
    ("Farmers market", 20_00, 1),
    ("Taxi", 15_00, 2),
    ("Streaming subscription", 12_00, 3),
    ("Restaurant", 45_00, 1),
    ("Gas station", 50_00, 2),
    ("Shopping spree", 120_00, 5),
    ("Medicine", 18_00, 6),
];

const SAMPLE_INCOMES: &[(&str, i64, i64, i64)] = &[
    // (description, amount in cents, category id, days ago)
    ("Monthly salary", 3_000_00, 9, 1),
    ("Project fee", 750_00, 11, 16),
    ("Gift from parents", 250_00, 10, 26),
];

const SAMPLE_GOALS: &[(&str, i64, i64, &str, Option<i64>)] = &[
    // (name, target cents, current cents, icon, deadline in days from now)
    ("Summer vacation", 5_000_00, 1_750_00, "✈", Some(180)),
    ("New laptop", 2_500_00, 1_300_00, "💻", Some(90)),
    ("Emergency fund", 10_000_00, 4_000_00, "🏦", None),
    ("New phone", 1_200_00, 220_00, "📱", Some(120)),
];

/// Insert the demo set through the repositories. Returns
/// (transactions inserted, goals inserted).
pub(crate) fn populate(repos: &Repos) -> Result<(usize, usize)> {
    let now = Utc::now();

    // One expense every other day, walking back from today
    for (i, &(desc, cents, category_id)) in SAMPLE_EXPENSES.iter().enumerate() {
        let date = (now - Duration::days(2 * i as i64)).timestamp_millis();
        repos.transactions.insert(Transaction::new(
            Decimal::new(cents, 2),
            desc.to_string(),
            category_id,
            TxnKind::Expense,
            date,
        ))?;
    }

    for &(desc, cents, category_id, days_ago) in SAMPLE_INCOMES {
        let date = (now - Duration::days(days_ago)).timestamp_millis();
        repos.transactions.insert(Transaction::new(
            Decimal::new(cents, 2),
            desc.to_string(),
            category_id,
            TxnKind::Income,
            date,
        ))?;
    }

    for &(name, target_cents, current_cents, icon, deadline_days) in SAMPLE_GOALS {
        let mut goal = Goal::new(
            name.to_string(),
            Decimal::new(target_cents, 2),
            deadline_days.map(|d| (now + Duration::days(d)).timestamp_millis()),
        );
        goal.current_amount = Decimal::new(current_cents, 2);
        goal.icon = icon.to_string();
        repos.goals.insert(goal)?;
    }

    Ok((
        SAMPLE_EXPENSES.len() + SAMPLE_INCOMES.len(),
        SAMPLE_GOALS.len(),
    ))
}
