//! SQLite company catalog.
//!
//! Uses a single SQLite database file with two tables:
//! - `companies` — the startup catalog searched by the agent tool
//! - `settings` — flag rows, currently only the `seeded` marker
//!
//! Keyword search matches case-insensitive substrings across the
//! company name, description, and website text columns.

use crate::dataset;
use async_trait::async_trait;
use chrono::Utc;
use scout_core::catalog::{Company, CompanyCatalog, SearchQuery};
use scout_core::error::CatalogError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A SQLite-backed company catalog.
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Create a new catalog from a file path.
    ///
    /// The database and all tables are created automatically. Pass
    /// `":memory:"` for an in-process ephemeral database (useful for tests).
    pub async fn new(path: &str) -> Result<Self, CatalogError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| CatalogError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| CatalogError::Storage(format!("Failed to open SQLite: {e}")))?;

        let catalog = Self { pool };
        catalog.run_migrations().await?;
        info!("SQLite company catalog initialized at {path}");
        Ok(catalog)
    }

    /// Run schema migrations.
    async fn run_migrations(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS companies (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at   TEXT NOT NULL,
                company_name TEXT NOT NULL,
                company_id   INTEGER,
                city         TEXT,
                description  TEXT,
                website_url  TEXT,
                website_text TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::MigrationFailed(format!("companies table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_companies_name ON companies(company_name)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::MigrationFailed(format!("companies index: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                setting_name TEXT PRIMARY KEY
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::MigrationFailed(format!("settings table: {e}")))?;

        Ok(())
    }

    /// Check whether the catalog has already been seeded.
    pub async fn is_seeded(&self) -> Result<bool, CatalogError> {
        let row = sqlx::query("SELECT setting_name FROM settings WHERE setting_name = 'seeded'")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CatalogError::QueryFailed(format!("Seeded check: {e}")))?;
        Ok(row.is_some())
    }

    /// Record that seeding has completed.
    pub async fn mark_seeded(&self) -> Result<(), CatalogError> {
        sqlx::query("INSERT OR IGNORE INTO settings (setting_name) VALUES ('seeded')")
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Storage(format!("Seeded marker: {e}")))?;
        Ok(())
    }

    /// Delete all companies.
    pub async fn clear_companies(&self) -> Result<(), CatalogError> {
        sqlx::query("DELETE FROM companies")
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::Storage(format!("Clear companies: {e}")))?;
        Ok(())
    }

    /// Number of companies in the catalog.
    pub async fn count(&self) -> Result<u64, CatalogError> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| CatalogError::QueryFailed(format!("Count: {e}")))?;
        let count: i64 = row
            .try_get("cnt")
            .map_err(|e| CatalogError::QueryFailed(format!("Count column: {e}")))?;
        Ok(count as u64)
    }

    /// Replace the catalog contents with the rows of a CSV dataset file.
    ///
    /// Returns the number of companies loaded. Existing rows are cleared
    /// first, so reseeding from the same file is idempotent.
    pub async fn seed_from_csv(&self, path: &Path) -> Result<usize, CatalogError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CatalogError::SeedFailed(format!("Read {}: {e}", path.display()))
        })?;
        let records = dataset::parse_dataset(&content)?;

        self.clear_companies().await?;

        let now = Utc::now().to_rfc3339();
        for record in &records {
            sqlx::query(
                r#"
                INSERT INTO companies
                    (created_at, company_name, company_id, city, description, website_url, website_text)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&now)
            .bind(&record.company_name)
            .bind(record.parsed_company_id())
            .bind(&record.city)
            .bind(&record.description)
            .bind(&record.website_url)
            .bind(&record.website_text)
            .execute(&self.pool)
            .await
            .map_err(|e| CatalogError::SeedFailed(format!("Insert company: {e}")))?;
        }

        info!(count = records.len(), "Seeded company catalog from {}", path.display());
        Ok(records.len())
    }

    /// Seed the catalog from the dataset file unless already seeded.
    ///
    /// A missing dataset file is logged and still marks the catalog as
    /// seeded, so startup does not retry on every launch. Returns the
    /// number of companies loaded (zero when nothing was done).
    pub async fn ensure_seeded(&self, dataset_path: &Path) -> Result<usize, CatalogError> {
        if self.is_seeded().await? {
            debug!("Company catalog already seeded");
            return Ok(0);
        }

        let loaded = if dataset_path.exists() {
            self.seed_from_csv(dataset_path).await?
        } else {
            warn!("Dataset file not found at {}", dataset_path.display());
            0
        };

        self.mark_seeded().await?;
        Ok(loaded)
    }

    /// Convert a database row into a [`Company`].
    fn row_to_company(row: &sqlx::sqlite::SqliteRow) -> Result<Company, CatalogError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing id: {e}")))?;
        let company_name: String = row
            .try_get("company_name")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing company_name: {e}")))?;
        let company_id: Option<i64> = row
            .try_get("company_id")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing company_id: {e}")))?;
        let city: Option<String> = row
            .try_get("city")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing city: {e}")))?;
        let description: Option<String> = row
            .try_get("description")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing description: {e}")))?;
        let website_url: Option<String> = row
            .try_get("website_url")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing website_url: {e}")))?;
        let website_text: Option<String> = row
            .try_get("website_text")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing website_text: {e}")))?;

        let created_at_str: String = row
            .try_get("created_at")
            .map_err(|e| CatalogError::QueryFailed(format!("Missing created_at: {e}")))?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Company {
            id,
            company_name,
            company_id,
            city,
            description,
            website_url,
            website_text,
            created_at,
        })
    }
}

#[async_trait]
impl CompanyCatalog for SqliteCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Company>, CatalogError> {
        debug!(
            keywords = ?query.keywords,
            city = ?query.city,
            limit = query.limit,
            "Searching company catalog"
        );

        let mut clauses: Vec<String> = Vec::new();
        let mut next_param = 1;

        if !query.keywords.is_empty() {
            let per_keyword: Vec<String> = query
                .keywords
                .iter()
                .map(|_| {
                    let p = next_param;
                    next_param += 1;
                    format!(
                        "(LOWER(company_name) LIKE '%' || LOWER(?{p}) || '%' \
                         OR LOWER(description) LIKE '%' || LOWER(?{p}) || '%' \
                         OR LOWER(website_text) LIKE '%' || LOWER(?{p}) || '%')"
                    )
                })
                .collect();
            clauses.push(format!("({})", per_keyword.join(" OR ")));
        }

        // An empty city string means no filter, matching the tool schema
        // where the field is optional.
        let city_filter = query.city.as_deref().filter(|c| !c.is_empty());
        if city_filter.is_some() {
            let p = next_param;
            next_param += 1;
            clauses.push(format!("LOWER(city) LIKE '%' || LOWER(?{p}) || '%'"));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let limit_param = next_param;
        let sql =
            format!("SELECT * FROM companies {where_sql} ORDER BY id ASC LIMIT ?{limit_param}");

        let mut db_query = sqlx::query(&sql);
        for keyword in &query.keywords {
            db_query = db_query.bind(keyword);
        }
        if let Some(city) = city_filter {
            db_query = db_query.bind(city);
        }
        db_query = db_query.bind(query.limit as i64);

        let rows = db_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::QueryFailed(format!("Company search: {e}")))?;

        rows.iter().map(Self::row_to_company).collect()
    }
}
