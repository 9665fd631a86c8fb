//! # Scout Core
//!
//! Domain types, traits, and error definitions for the Scout startup-search
//! agent. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod catalog;
pub mod error;
pub mod message;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use catalog::{Company, CompanyCatalog, SearchQuery, SearchResult};
pub use error::{Error, Result};
pub use message::{Message, Role, ToolCallDescriptor, Transcript};
pub use provider::{Provider, ProviderRequest, StreamChunk, ToolCallFragment, ToolDefinition};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
