//! Provider trait — the abstraction over the streaming LLM backend.
//!
//! A Provider sends a transcript to a chat-completion endpoint and returns
//! the turn as an ordered stream of events: incremental text, raw tool-call
//! fragments, and a terminal marker. Fragment reassembly is deliberately
//! NOT done here; the agent loop owns that.

use crate::error::ProviderError;
use crate::message::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "anthropic/claude-sonnet-4.5")
    pub model: String,

    /// The full transcript so far
    pub messages: Vec<Message>,

    /// Sampling temperature; omitted from the wire when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate; omitted from the wire when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// One event in a streaming response.
///
/// Any combination of fields may be populated: a text delta, zero or more
/// tool-call fragments, and the terminal marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamChunk {
    /// Partial text content
    #[serde(default)]
    pub text: Option<String>,

    /// Raw tool-call delta fragments, untouched by any accumulation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fragments: Vec<ToolCallFragment>,

    /// Whether this is the final event of the turn
    #[serde(default)]
    pub done: bool,
}

impl StreamChunk {
    /// A chunk carrying only the terminal marker.
    pub fn terminal() -> Self {
        Self {
            done: true,
            ..Self::default()
        }
    }
}

/// One incremental unit of a tool-call delta within a turn.
///
/// `index` is the call's stable position within the turn; the other fields
/// carry whatever pieces this particular event happened to include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallFragment {
    /// Turn-local call position, starting at 0
    pub index: u32,

    /// Call ID piece (typically present only on the first fragment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Function name piece (typically present only on the first fragment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Partial arguments text, to be concatenated in arrival order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

/// The streaming chat-completion capability.
///
/// One instance is constructed per process and shared by reference across
/// all requests; implementations hold no per-request state.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a request and get a stream of response events.
    ///
    /// The receiver yields events in arrival order and closes when the turn
    /// is over; a `done` chunk marks the end of well-formed turns.
    async fn stream(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<StreamChunk, ProviderError>>,
        ProviderError,
    >;
}
