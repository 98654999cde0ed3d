use anyhow::Result;

use crate::repo::Repos;
use crate::store::Store;
use crate::ui::util::format_amount;
use crate::views::Views;

pub(crate) fn as_cli(args: &[String], store: &Store, repos: &Repos) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(store, repos),
        "sample" => cli_sample(repos),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("fintui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FinTUI — local-only income & expense tracker");
    println!();
    println!("Usage: fintui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print balance, totals and breakdowns");
    println!("  sample                        Insert demo transactions and goals");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(store: &Store, repos: &Repos) -> Result<()> {
    let views = Views::new(store)?;
    let balance = views.balance.get();
    let income = views.total_income.get();
    let expense = views.total_expense.get();
    let by_category = views.expenses_by_category.get();
    let monthly = views.monthly_expenses.get();
    let txn_count = repos.transactions.count()?;
    let txns = repos.transactions.all()?;
    let income_count = txns.iter().filter(|t| t.is_income()).count();
    let expense_count = txns.iter().filter(|t| t.is_expense()).count();
    let goals = repos.goals.all()?;

    println!("FinTUI — summary");
    println!("{}", "─".repeat(40));
    println!("  Balance:    {}", format_amount(balance));
    println!("  Income:     {}", format_amount(income));
    println!("  Expenses:   {}", format_amount(expense));
    println!("  Total Txns: {txn_count} ({income_count} in / {expense_count} out)");

    if !by_category.is_empty() {
        println!();
        println!("Expenses by Category:");
        for (name, amount) in &by_category {
            println!("  {name:<24} {}", format_amount(*amount));
        }
    }

    if !monthly.is_empty() {
        println!();
        println!("Monthly Expenses:");
        for (month, amount) in &monthly {
            println!("  {month:<24} {}", format_amount(*amount));
        }
    }

    if !goals.is_empty() {
        println!();
        println!("Goals:");
        for goal in &goals {
            println!(
                "  {:<24} {}/{} ({:.0}%)",
                goal.name,
                format_amount(goal.current_amount),
                format_amount(goal.target_amount),
                goal.progress() * 100.0
            );
        }
    }

    Ok(())
}

fn cli_sample(repos: &Repos) -> Result<()> {
    let (txns, goals) = crate::sample::populate(repos)?;
    println!("Inserted {txns} sample transactions and {goals} goals");
    Ok(())
}
