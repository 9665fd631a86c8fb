//! Company catalog trait — the read-only storage collaborator.
//!
//! The catalog holds the fixed company dataset. The only capability the
//! rest of the system needs is the substring-filtered read used by the
//! `search_startups` tool.

use crate::error::CatalogError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Description length cap applied when a company row becomes a search
/// result. Hard cut in characters, no ellipsis.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// A stored company record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Surrogate key assigned by storage
    pub id: i64,

    /// Company name
    pub company_name: String,

    /// External numeric ID from the source dataset (when parseable)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,

    /// City the company is based in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Company website URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Full text scraped from the company website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_text: Option<String>,

    /// When this row was created
    pub created_at: DateTime<Utc>,
}

/// A search request against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Keywords, matched as case-insensitive substrings (OR across
    /// keywords, OR across name/description/website text per keyword).
    /// An empty list passes every record.
    pub keywords: Vec<String>,

    /// Optional city filter, matched as a case-insensitive substring
    #[serde(default)]
    pub city: Option<String>,

    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

/// A single search hit, shaped for the model's consumption.
///
/// All fields are plain strings; absent source fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub company_name: String,
    pub description: String,
    pub website_url: String,
    pub city: String,
}

impl SearchResult {
    /// Convert a stored company row into a result, truncating the
    /// description to [`MAX_DESCRIPTION_CHARS`] characters.
    pub fn from_company(company: &Company) -> Self {
        let description = company
            .description
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(MAX_DESCRIPTION_CHARS)
            .collect();

        Self {
            company_name: company.company_name.clone(),
            description,
            website_url: company.website_url.clone().unwrap_or_default(),
            city: company.city.clone().unwrap_or_default(),
        }
    }
}

/// The read capability over the company catalog.
///
/// Implementations must be deterministic: repeated identical queries
/// against unchanged data return the same rows in the same order. Each
/// query acquires and releases its storage handle on every exit path.
#[async_trait]
pub trait CompanyCatalog: Send + Sync {
    /// Run one substring-filtered read, returning at most `query.limit`
    /// matching rows.
    async fn search(&self, query: &SearchQuery) -> std::result::Result<Vec<Company>, CatalogError>;
}
