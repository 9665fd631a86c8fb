//! Startup search tool — lets the agent query the company catalog.

use async_trait::async_trait;
use scout_core::catalog::{CompanyCatalog, SearchQuery, SearchResult};
use scout_core::error::ToolError;
use scout_core::tool::{Tool, ToolResult};
use std::sync::Arc;
use tracing::debug;

/// A tool that searches the startup catalog by keywords and optional city.
pub struct SearchStartupsTool {
    catalog: Arc<dyn CompanyCatalog>,
}

impl SearchStartupsTool {
    pub fn new(catalog: Arc<dyn CompanyCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for SearchStartupsTool {
    fn name(&self) -> &str {
        "search_startups"
    }

    fn description(&self) -> &str {
        "Search the startup database using keywords and optional city filter"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "keywords": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Search terms to match against company names, descriptions, and website text"
                },
                "city": {
                    "type": "string",
                    "description": "Optional city name to filter results"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default 10)",
                    "default": 10
                }
            },
            "required": ["keywords"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResult, ToolError> {
        let query: SearchQuery = serde_json::from_value(arguments)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        debug!(
            keywords = ?query.keywords,
            city = ?query.city,
            limit = query.limit,
            "Executing startup search"
        );

        let companies =
            self.catalog
                .search(&query)
                .await
                .map_err(|e| ToolError::ExecutionFailed {
                    tool_name: "search_startups".into(),
                    reason: e.to_string(),
                })?;

        let results: Vec<SearchResult> = companies.iter().map(SearchResult::from_company).collect();

        let output = serde_json::to_string(&results)
            .map_err(|e| ToolError::ExecutionFailed {
                tool_name: "search_startups".into(),
                reason: format!("Result serialization: {e}"),
            })?;

        Ok(ToolResult {
            call_id: String::new(),
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::catalog::Company;
    use scout_core::error::CatalogError;

    /// An in-test catalog with a fixed company list.
    struct FixedCatalog {
        companies: Vec<Company>,
    }

    #[async_trait]
    impl CompanyCatalog for FixedCatalog {
        async fn search(
            &self,
            query: &SearchQuery,
        ) -> std::result::Result<Vec<Company>, CatalogError> {
            let mut matched: Vec<Company> = self
                .companies
                .iter()
                .filter(|c| {
                    query.keywords.is_empty()
                        || query.keywords.iter().any(|kw| {
                            let kw = kw.to_lowercase();
                            c.company_name.to_lowercase().contains(&kw)
                                || c.description
                                    .as_deref()
                                    .is_some_and(|d| d.to_lowercase().contains(&kw))
                        })
                })
                .cloned()
                .collect();
            matched.truncate(query.limit as usize);
            Ok(matched)
        }
    }

    /// A catalog whose searches always fail.
    struct BrokenCatalog;

    #[async_trait]
    impl CompanyCatalog for BrokenCatalog {
        async fn search(
            &self,
            _query: &SearchQuery,
        ) -> std::result::Result<Vec<Company>, CatalogError> {
            Err(CatalogError::QueryFailed("disk on fire".into()))
        }
    }

    fn company(id: i64, name: &str, description: &str) -> Company {
        Company {
            id,
            company_name: name.into(),
            company_id: Some(id),
            city: Some("Boston".into()),
            description: Some(description.into()),
            website_url: Some(format!("https://{}.example", name.to_lowercase())),
            website_text: Some("landing page text".into()),
            created_at: chrono::Utc::now(),
        }
    }

    fn fixed_tool() -> SearchStartupsTool {
        SearchStartupsTool::new(Arc::new(FixedCatalog {
            companies: vec![
                company(1, "Acme", "Data analytics platform"),
                company(2, "PayFlow", "Payments for fintech"),
            ],
        }))
    }

    #[test]
    fn tool_definition() {
        let tool = fixed_tool();
        assert_eq!(tool.name(), "search_startups");
        let schema = tool.parameters_schema();
        assert_eq!(schema["required"], serde_json::json!(["keywords"]));
        assert_eq!(schema["properties"]["limit"]["default"], 10);
    }

    #[tokio::test]
    async fn returns_results_as_json() {
        let tool = fixed_tool();
        let result = tool
            .execute(serde_json::json!({"keywords": ["fintech"]}))
            .await
            .unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["company_name"], "PayFlow");
        assert_eq!(parsed[0]["city"], "Boston");
    }

    #[tokio::test]
    async fn empty_match_returns_empty_json_array() {
        let tool = fixed_tool();
        let result = tool
            .execute(serde_json::json!({"keywords": ["quantum"]}))
            .await
            .unwrap();
        assert_eq!(result.output, "[]");
    }

    #[tokio::test]
    async fn limit_default_applies() {
        let tool = fixed_tool();
        let result = tool
            .execute(serde_json::json!({"keywords": []}))
            .await
            .unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[tokio::test]
    async fn missing_keywords_is_invalid() {
        let tool = fixed_tool();
        let err = tool
            .execute(serde_json::json!({"city": "Boston"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn wrong_keyword_type_is_invalid() {
        let tool = fixed_tool();
        let err = tool
            .execute(serde_json::json!({"keywords": "fintech"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn catalog_failure_maps_to_execution_error() {
        let tool = SearchStartupsTool::new(Arc::new(BrokenCatalog));
        let err = tool
            .execute(serde_json::json!({"keywords": ["anything"]}))
            .await
            .unwrap_err();
        match err {
            ToolError::ExecutionFailed { tool_name, reason } => {
                assert_eq!(tool_name, "search_startups");
                assert!(reason.contains("disk on fire"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn description_is_truncated_in_results() {
        let long = "x".repeat(500);
        let tool = SearchStartupsTool::new(Arc::new(FixedCatalog {
            companies: vec![company(1, "Verbose", &long)],
        }));
        let result = tool
            .execute(serde_json::json!({"keywords": ["x"]}))
            .await
            .unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&result.output).unwrap();
        let description = parsed[0]["description"].as_str().unwrap();
        assert_eq!(description.chars().count(), 300);
    }
}
