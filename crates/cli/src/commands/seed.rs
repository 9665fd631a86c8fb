//! `scout seed` — Reload the company catalog from the CSV dataset.
//!
//! Unlike startup seeding, this always reloads, replacing whatever rows
//! the database currently holds.

use scout_config::AppConfig;
use scout_storage::SqliteCatalog;
use std::path::Path;

pub async fn run(csv_override: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let dataset = csv_override.unwrap_or_else(|| config.storage.dataset_path.clone());

    let catalog = SqliteCatalog::new(&config.storage.database_path).await?;
    let loaded = catalog.seed_from_csv(Path::new(&dataset)).await?;
    catalog.mark_seeded().await?;

    println!("🌱 Seeded {loaded} companies from {dataset}");
    println!("   Database: {}", config.storage.database_path);

    Ok(())
}
