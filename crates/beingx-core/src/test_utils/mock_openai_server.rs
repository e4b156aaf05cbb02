// Minimal OpenAI-compatible server for exercising the REST clients in tests.
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct MockServerState {
    embeddings: Arc<Mutex<VecDeque<Result<Vec<f32>, StatusCode>>>>,
    replies: Arc<Mutex<VecDeque<Result<String, StatusCode>>>>,
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn embeddings_handler(
    State(state): State<MockServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    log::debug!("Mock server received embeddings request: {}", payload);
    state.requests.lock().unwrap().push(payload);

    match state.embeddings.lock().unwrap().pop_front() {
        Some(Ok(embedding)) => Ok(Json(json!({
            "object": "list",
            "data": [{ "object": "embedding", "index": 0, "embedding": embedding }],
            "model": "mock-embedding"
        }))),
        Some(Err(status)) => Err(status),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn chat_completions_handler(
    State(state): State<MockServerState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    log::debug!("Mock server received chat request: {}", payload);
    state.requests.lock().unwrap().push(payload);

    match state.replies.lock().unwrap().pop_front() {
        Some(Ok(content)) => Ok(Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 }
        }))),
        Some(Err(status)) => Err(status),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

pub struct MockOpenAIServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockOpenAIServer {
    pub async fn start(
        embeddings: Vec<Result<Vec<f32>, StatusCode>>,
        replies: Vec<Result<String, StatusCode>>,
    ) -> Self {
        let state = MockServerState {
            embeddings: Arc::new(Mutex::new(VecDeque::from(embeddings))),
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/v1/embeddings", post(embeddings_handler))
            .route("/v1/chat/completions", post(chat_completions_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| log::error!("Mock server error: {}", e));
        });

        Self {
            addr,
            shutdown_tx,
            requests,
        }
    }

    /// Base URL including the `/v1` prefix, as the clients expect.
    pub fn api_base(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
}
