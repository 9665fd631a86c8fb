//! The chat endpoint.
//!
//! Accepts the message format the web UI sends (role plus a list of typed
//! parts), flattens it into plain transcript messages, and streams the
//! agent's output back as raw UTF-8 text. There is no framing and no
//! error channel; when the stream closes, the response is over.

use crate::SharedState;
use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use scout_core::message::Message;
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// One typed part of a UI message. Only `text` parts carry content.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePart {
    #[serde(rename = "type")]
    pub part_type: String,

    #[serde(default)]
    pub text: Option<String>,
}

/// One message as the UI sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,

    pub role: String,

    pub parts: Vec<MessagePart>,
}

/// The chat request body: the whole conversation so far.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Flatten a UI message's parts into one text string.
///
/// Non-text parts and empty text parts are dropped; the rest join with
/// single spaces.
fn extract_text(message: &ChatMessage) -> String {
    message
        .parts
        .iter()
        .filter(|part| part.part_type == "text")
        .filter_map(|part| part.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map the UI conversation onto transcript messages.
///
/// Unrecognized roles are treated as user messages.
fn to_agent_messages(request: &ChatRequest) -> Vec<Message> {
    request
        .messages
        .iter()
        .map(|message| {
            let content = extract_text(message);
            match message.role.as_str() {
                "assistant" => Message::assistant(Some(content), Vec::new()),
                "system" => Message::system(content),
                _ => Message::user(content),
            }
        })
        .collect()
}

/// POST /api/chat
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> TextStreamResponse {
    let messages = to_agent_messages(&request);
    debug!(messages = messages.len(), "Chat request received");
    TextStreamResponse(state.agent.run_stream(messages))
}

/// A raw text streaming response.
///
/// Marked non-cacheable so proxies pass pieces through as they arrive.
pub struct TextStreamResponse(pub mpsc::Receiver<String>);

impl IntoResponse for TextStreamResponse {
    fn into_response(self) -> Response {
        let stream = ReceiverStream::new(self.0).map(Ok::<_, Infallible>);
        let body = Body::from_stream(stream);

        (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-cache"),
                (header::CONNECTION, "keep-alive"),
            ],
            body,
        )
            .into_response()
    }
}
