//! `scout search` — Query the company catalog without going through
//! the agent. Useful for checking what the model would see.

use scout_config::AppConfig;
use scout_core::catalog::{CompanyCatalog, SearchQuery, SearchResult};
use scout_storage::SqliteCatalog;
use std::path::Path;

pub async fn run(
    keywords: Vec<String>,
    city: Option<String>,
    limit: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let catalog = SqliteCatalog::new(&config.storage.database_path).await?;
    catalog
        .ensure_seeded(Path::new(&config.storage.dataset_path))
        .await?;

    let query = SearchQuery {
        keywords,
        city,
        limit,
    };
    let companies = catalog.search(&query).await?;

    if companies.is_empty() {
        println!("No companies matched.");
        return Ok(());
    }

    println!("🔎 {} match(es)", companies.len());
    println!();
    for company in &companies {
        let result = SearchResult::from_company(company);
        println!("  {}", result.company_name);
        if !result.city.is_empty() {
            println!("    City:    {}", result.city);
        }
        if !result.website_url.is_empty() {
            println!("    Website: {}", result.website_url);
        }
        if !result.description.is_empty() {
            println!("    {}", result.description);
        }
        println!();
    }

    Ok(())
}
