//! HTTP gateway for Scout.
//!
//! Exposes the chat endpoint consumed by the web UI plus a health check.
//! Chat responses are streamed as raw UTF-8 text, not SSE; the client
//! renders the bytes as they arrive.
//!
//! Built on Axum for high performance async HTTP.

pub mod chat;

use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    response::Json,
    routing::{get, post},
};
use scout_agent::AgentLoop;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: Arc<AgentLoop>,
    pub cors_origin: String,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat::chat_handler))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser UI: one exact origin, with credentials.
///
/// An origin that does not parse as a header value fails closed and no
/// cross-origin caller is allowed.
fn cors_layer(cors_origin: &str) -> CorsLayer {
    let origin = match cors_origin.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!(origin = %cors_origin, "Invalid CORS origin, allowing none");
            AllowOrigin::list([])
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host and port and serves until the process
/// exits. The agent is built by the caller so its catalog can be seeded
/// before the first request arrives.
pub async fn start(
    config: &scout_config::AppConfig,
    agent: Arc<AgentLoop>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = Arc::new(GatewayState {
        agent,
        cors_origin: config.gateway.cors_origin.clone(),
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use scout_core::error::ProviderError;
    use scout_core::provider::{Provider, ProviderRequest, StreamChunk};
    use scout_core::tool::ToolRegistry;
    use tokio::sync::mpsc;
    use tower::ServiceExt;

    /// A provider that streams a fixed list of text pieces.
    struct ScriptedProvider {
        pieces: Vec<&'static str>,
    }

    #[async_trait::async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn stream(
            &self,
            _request: ProviderRequest,
        ) -> Result<mpsc::Receiver<Result<StreamChunk, ProviderError>>, ProviderError> {
            let pieces = self.pieces.clone();
            let (tx, rx) = mpsc::channel(16);
            tokio::spawn(async move {
                for piece in pieces {
                    let chunk = StreamChunk {
                        text: Some(piece.to_string()),
                        fragments: vec![],
                        done: false,
                    };
                    if tx.send(Ok(chunk)).await.is_err() {
                        return;
                    }
                }
                let _ = tx.send(Ok(StreamChunk::terminal())).await;
            });
            Ok(rx)
        }
    }

    fn test_state(pieces: Vec<&'static str>) -> SharedState {
        let agent = AgentLoop::new(
            Arc::new(ScriptedProvider { pieces }),
            "mock-model",
            Arc::new(ToolRegistry::new()),
        );
        Arc::new(GatewayState {
            agent: Arc::new(agent),
            cors_origin: "http://localhost:5173".into(),
        })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state(vec![]));

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn chat_streams_plain_text_with_no_cache_headers() {
        let app = build_router(test_state(vec!["Hello", " from", " Scout"]));

        let payload = serde_json::json!({
            "messages": [
                {
                    "id": "msg_1",
                    "role": "user",
                    "parts": [{"type": "text", "text": "hi"}]
                }
            ]
        });

        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(
            headers.get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(headers.get("cache-control").unwrap(), "no-cache");
        assert_eq!(headers.get("connection").unwrap(), "keep-alive");

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Hello from Scout");
    }

    #[tokio::test]
    async fn chat_rejects_malformed_body() {
        let app = build_router(test_state(vec![]));

        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"messages": [{"parts": []}]}"#))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
