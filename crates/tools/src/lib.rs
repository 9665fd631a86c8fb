//! Built-in tool implementations for Scout.
//!
//! Scout exposes a single tool to the model: `search_startups`, which
//! queries the company catalog.

pub mod search_startups;

pub use search_startups::SearchStartupsTool;

use scout_core::CompanyCatalog;
use scout_core::tool::ToolRegistry;
use std::sync::Arc;

/// Create the default tool registry backed by the given catalog.
pub fn default_registry(catalog: Arc<dyn CompanyCatalog>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SearchStartupsTool::new(catalog)));
    registry
}
