//! The streaming agent loop.
//!
//! One call to [`AgentLoop::run_stream`] drives a whole conversation turn:
//! the model streams text and tool-call fragments, named tool calls are
//! executed in index order, their results land in the transcript, and the
//! model is called again with the full transcript until a turn produces no
//! tool calls.
//!
//! Failures are never surfaced to the client. Any provider, argument, or
//! tool error logs a warning and closes the output stream where it stands.

use crate::accumulator::DeltaAccumulator;
use scout_core::message::{Message, Transcript};
use scout_core::provider::{Provider, ProviderRequest};
use scout_core::tool::{ToolCall, ToolRegistry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The system prompt that frames every conversation.
pub const SYSTEM_PROMPT: &str = "You are a startup search assistant with access to a database of B2B SaaS startups from 2021-2022.

When users ask about startups:
1. Use the search_startups function to query the database with relevant keywords
2. Analyze the results against the user's specific needs
3. Return your findings as a markdown table with columns: Company Name, Description, Website, Location, Justification

For explicit searches like \"fintech startups in New York\", use keywords like [\"fintech\", \"finance\"] and city=\"New York\".

For higher-order queries like \"suggest additions to my portfolio\", think about related industries and technologies.

Always explain why each startup matches the user's query in the Justification column.

IMPORTANT FORMATTING RULES:
- Use proper markdown with blank lines between paragraphs
- Do NOT write commentary between tool calls - just make the tool calls silently
- After all searches are complete, provide ONE final summary with the markdown table
- Keep your response concise and well-formatted";

/// The streaming agent loop that orchestrates LLM calls and tool execution.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Sampling temperature, forwarded when set
    temperature: Option<f32>,

    /// Max tokens per model response, forwarded when set
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: None,
            max_tokens: None,
            tools,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Run one conversation turn, streaming response text.
    ///
    /// The caller's messages are placed behind the system prompt in a fresh
    /// transcript. The returned receiver yields text exactly as it should
    /// reach the client: model deltas interleaved with search progress
    /// notices. The channel closes when the turn is over, whether it
    /// finished or failed; the client cannot tell the two apart.
    pub fn run_stream(&self, messages: Vec<Message>) -> mpsc::Receiver<String> {
        let (tx, rx) = mpsc::channel::<String>(64);

        let provider = Arc::clone(&self.provider);
        let tools = Arc::clone(&self.tools);
        let model = self.model.clone();
        let temperature = self.temperature;
        let max_tokens = self.max_tokens;
        let request_id = Uuid::new_v4();

        tokio::spawn(async move {
            let definitions = tools.definitions();

            let mut transcript = Transcript::new();
            transcript.push(Message::system(SYSTEM_PROMPT));
            for message in messages {
                transcript.push(message);
            }

            info!(
                request_id = %request_id,
                messages = transcript.len(),
                "Starting agent turn"
            );

            let mut turn = 0u32;

            loop {
                turn += 1;

                if tx.is_closed() {
                    debug!(request_id = %request_id, turn, "Client disconnected, stopping");
                    return;
                }

                debug!(request_id = %request_id, turn, "Requesting model response");

                // The whole transcript is resent on every turn
                let request = ProviderRequest {
                    model: model.clone(),
                    messages: transcript.messages().to_vec(),
                    temperature,
                    max_tokens,
                    tools: definitions.clone(),
                };

                let mut chunks = match provider.stream(request).await {
                    Ok(rx) => rx,
                    Err(e) => {
                        warn!(request_id = %request_id, turn, error = %e, "Provider request failed");
                        return;
                    }
                };

                let mut collected = String::new();
                let mut accumulator = DeltaAccumulator::new();

                while let Some(item) = chunks.recv().await {
                    let chunk = match item {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            warn!(request_id = %request_id, turn, error = %e, "Provider stream failed");
                            return;
                        }
                    };

                    if let Some(text) = &chunk.text
                        && !text.is_empty()
                    {
                        collected.push_str(text);
                        if tx.send(text.clone()).await.is_err() {
                            debug!(request_id = %request_id, turn, "Client disconnected mid-stream");
                            return;
                        }
                    }

                    for fragment in &chunk.fragments {
                        accumulator.apply(fragment);
                    }

                    if chunk.done {
                        break;
                    }
                }

                // A turn without a complete tool call is the final answer
                if !accumulator.has_named_call() {
                    debug!(request_id = %request_id, turn, "Turn complete without tool calls");
                    return;
                }

                let descriptors = accumulator.to_descriptors();
                debug!(
                    request_id = %request_id,
                    turn,
                    tool_count = descriptors.len(),
                    "Executing tool calls"
                );

                let content = if collected.is_empty() {
                    None
                } else {
                    Some(collected.clone())
                };
                transcript.push(Message::assistant(content, descriptors.clone()));

                for descriptor in &descriptors {
                    let arguments: serde_json::Value =
                        match serde_json::from_str(&descriptor.arguments) {
                            Ok(value) => value,
                            Err(e) => {
                                warn!(
                                    request_id = %request_id,
                                    tool = %descriptor.name,
                                    error = %e,
                                    "Malformed tool arguments"
                                );
                                return;
                            }
                        };

                    if tx.send(search_notice(&arguments)).await.is_err() {
                        debug!(request_id = %request_id, turn, "Client disconnected mid-stream");
                        return;
                    }

                    let call = ToolCall {
                        id: descriptor.id.clone(),
                        name: descriptor.name.clone(),
                        arguments,
                    };

                    match tools.execute(&call).await {
                        Ok(result) => {
                            transcript.push(Message::tool_result(&descriptor.id, &result.output));
                        }
                        Err(e) => {
                            warn!(
                                request_id = %request_id,
                                tool = %descriptor.name,
                                error = %e,
                                "Tool execution failed"
                            );
                            return;
                        }
                    }
                }

                // Loop back with the tool results appended; the model sees
                // them and decides what to do next.
            }
        });

        rx
    }
}

/// The progress notice streamed to the client before a search runs.
///
/// Keywords render best-effort here; anything that is not an array of
/// strings shows as empty. The tool itself validates strictly.
fn search_notice(arguments: &serde_json::Value) -> String {
    let keywords = arguments
        .get("keywords")
        .and_then(|k| k.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    format!("\n\n\u{1F50D} *Searching database for: {keywords}...*\n\n")
}
