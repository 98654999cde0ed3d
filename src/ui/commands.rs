use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{Category, Goal, Transaction, TxnKind};
use crate::repo::Repos;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Repos) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FinTUI", cmd_quit, r);
    register_command!("quit", "Quit FinTUI", cmd_quit, r);
    register_command!("home", "Go to Home", cmd_home, r);
    register_command!("h", "Go to Home", cmd_home, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("s", "Go to Statistics", cmd_statistics, r);
    register_command!("stats", "Go to Statistics", cmd_statistics, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add expense 12.50 Food Lunch)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction", cmd_add, r);
    register_command!(
        "rename",
        "Rename selected transaction",
        cmd_rename,
        r
    );
    register_command!(
        "recat",
        "Re-categorize selected transaction (e.g. :recat Transport)",
        cmd_recat,
        r
    );
    register_command!(
        "note",
        "Set the note on the selected transaction",
        cmd_note,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "goal",
        "Add savings goal (e.g. :goal 5000 Summer vacation)",
        cmd_goal,
        r
    );
    register_command!(
        "fund",
        "Add funds to selected goal (e.g. :fund 250)",
        cmd_fund,
        r
    );
    register_command!("delete-goal", "Delete selected goal", cmd_delete_goal, r);
    register_command!(
        "category",
        "Add category (e.g. :category expense Pets 🐾)",
        cmd_category,
        r
    );
    register_command!(
        "delete-cat",
        "Delete selected category",
        cmd_delete_cat,
        r
    );
    register_command!("sample", "Insert sample data", cmd_sample, r);
    register_command!(
        "reset",
        "Delete all transactions and goals",
        cmd_reset,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, repos)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Input validation ─────────────────────────────────────────
// The core trusts its callers; everything user-typed is checked here.

fn parse_positive_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .ok()
        .filter(|amount| *amount > Decimal::ZERO)
}

fn parse_kind(s: &str) -> Option<TxnKind> {
    match s.to_lowercase().as_str() {
        "income" | "in" => Some(TxnKind::Income),
        "expense" | "out" => Some(TxnKind::Expense),
        _ => None,
    }
}

/// Category lookup restricted to the given kind, so an expense can never
/// be filed under an income category from the UI.
fn find_category(categories: &[Category], name: &str, kind: TxnKind) -> Option<i64> {
    let lower = name.to_lowercase();
    categories
        .iter()
        .find(|c| c.kind == kind && c.name.to_lowercase() == lower)
        .and_then(|c| c.id)
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_home(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.screen = Screen::Home;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    Ok(())
}

fn cmd_statistics(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.screen = Screen::Statistics;
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.screen = Screen::Goals;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(kind) = parts.next().and_then(parse_kind) else {
        app.set_status("Usage: :add <income|expense> <amount> <category> <description>");
        return Ok(());
    };
    let Some(amount) = parts.next().and_then(parse_positive_amount) else {
        app.set_status("Amount must be a positive number");
        return Ok(());
    };
    let Some(cat_name) = parts.next() else {
        app.set_status("Usage: :add <income|expense> <amount> <category> <description>");
        return Ok(());
    };
    let Some(category_id) = find_category(&app.categories, cat_name, kind) else {
        app.set_status(format!("No {kind} category named '{cat_name}'"));
        return Ok(());
    };
    let description = parts.collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        app.set_status("Description cannot be empty");
        return Ok(());
    }

    let txn = Transaction::new(
        amount,
        description.clone(),
        category_id,
        kind,
        chrono::Utc::now().timestamp_millis(),
    );
    repos.transactions.insert(txn)?;
    app.screen = Screen::Transactions;
    app.set_status(format!("Added {kind}: {description}"));
    Ok(())
}

fn cmd_rename(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    if app.selected_transaction().is_none() {
        app.set_status("No transaction selected");
        return Ok(());
    }
    app.screen = Screen::Transactions;
    app.input_mode = InputMode::Editing;
    app.command_input.clear();
    Ok(())
}

fn cmd_recat(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let Some(txn) = app.selected_transaction().cloned() else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    if args.is_empty() {
        app.set_status("Usage: :recat <category>");
        return Ok(());
    }
    let Some(category_id) = find_category(&app.categories, args, txn.kind) else {
        app.set_status(format!("No {} category named '{args}'", txn.kind));
        return Ok(());
    };

    let mut updated = txn;
    updated.category_id = category_id;
    repos.transactions.update(updated)?;
    app.set_status(format!("Re-categorized as '{args}'"));
    Ok(())
}

fn cmd_note(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let Some(txn) = app.selected_transaction().cloned() else {
        app.set_status("No transaction selected");
        return Ok(());
    };

    let mut updated = txn;
    updated.note = if args.is_empty() {
        None
    } else {
        Some(args.to_string())
    };
    let cleared = updated.note.is_none();
    repos.transactions.update(updated)?;
    app.set_status(if cleared { "Note cleared" } else { "Note saved" });
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    let Some((id, description)) = app
        .selected_transaction()
        .and_then(|t| t.id.map(|id| (id, t.description.clone())))
    else {
        app.set_status("No transaction selected");
        return Ok(());
    };
    app.confirm_message = format!("Delete '{description}'?");
    app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_goal(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(target) = parts.next().and_then(parse_positive_amount) else {
        app.set_status("Usage: :goal <target amount> <name>");
        return Ok(());
    };
    let name = parts.collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        app.set_status("Goal name cannot be empty");
        return Ok(());
    }

    repos.goals.insert(Goal::new(name.clone(), target, None))?;
    app.screen = Screen::Goals;
    app.set_status(format!("Added goal: {name}"));
    Ok(())
}

fn cmd_fund(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let Some(goal) = app.selected_goal().cloned() else {
        app.set_status("No goal selected");
        return Ok(());
    };
    let Some(amount) = parse_positive_amount(args.trim()) else {
        app.set_status("Usage: :fund <amount>");
        return Ok(());
    };

    // Progress updates are a full-record replace with the new amount
    let mut updated = goal;
    updated.current_amount += amount;
    let reached = !updated.is_active();
    let name = updated.name.clone();
    repos.goals.update(updated)?;
    app.set_status(if reached {
        format!("Goal '{name}' reached! 🎉")
    } else {
        format!("Added funds to '{name}'")
    });
    Ok(())
}

fn cmd_delete_goal(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    let Some((id, name)) = app
        .selected_goal()
        .and_then(|g| g.id.map(|id| (id, g.name.clone())))
    else {
        app.set_status("No goal selected");
        return Ok(());
    };
    app.confirm_message = format!("Delete goal '{name}'?");
    app.pending_action = Some(PendingAction::DeleteGoal { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let mut parts = args.split_whitespace();
    let Some(kind) = parts.next().and_then(parse_kind) else {
        app.set_status("Usage: :category <income|expense> <name> [icon]");
        return Ok(());
    };
    let Some(name) = parts.next() else {
        app.set_status("Usage: :category <income|expense> <name> [icon]");
        return Ok(());
    };
    if find_category(&app.categories, name, kind).is_some() {
        app.set_status(format!("A {kind} category named '{name}' already exists"));
        return Ok(());
    }
    let icon = parts.next().unwrap_or("📦").to_string();

    repos.categories.insert(Category::new(
        name.to_string(),
        icon,
        String::new(),
        kind,
    ))?;
    app.screen = Screen::Categories;
    app.set_status(format!("Added category: {name}"));
    Ok(())
}

fn cmd_delete_cat(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    let Some((id, name)) = app
        .selected_category()
        .and_then(|c| c.id.map(|id| (id, c.name.clone())))
    else {
        app.set_status("No category selected");
        return Ok(());
    };
    // No cascade: transactions keep the id and show "Unknown" afterwards
    app.confirm_message = format!("Delete category '{name}'?");
    app.pending_action = Some(PendingAction::DeleteCategory { id, name });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_sample(_args: &str, app: &mut App, repos: &Repos) -> anyhow::Result<()> {
    let (txns, goals) = crate::sample::populate(repos)?;
    app.set_status(format!("Inserted {txns} sample transactions and {goals} goals"));
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App, _repos: &Repos) -> anyhow::Result<()> {
    app.confirm_message = "Delete ALL transactions and goals?".to_string();
    app.pending_action = Some(PendingAction::Reset);
    app.input_mode = InputMode::Confirm;
    Ok(())
}
