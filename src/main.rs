mod db;
mod models;
mod repo;
mod run;
mod sample;
mod store;
mod ui;
mod views;

use anyhow::{Context, Result};
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    // The store is built once here and handed to everything that needs it;
    // opening it runs migrations and first-run category seeding.
    let store = Arc::new(store::Store::open(&db_path)?);
    let repos = repo::Repos::new(store.clone());

    match args.len() {
        1 => run::as_tui(&store, &repos),
        _ => run::as_cli(&args, &store, &repos),
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "fintui", "FinTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("fintui.db"))
}
