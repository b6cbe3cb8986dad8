//! Fake CMS / gifting API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Every request is recorded and answered from a table of canned
//! replies keyed by method and path. Paths with no reply get the CMS's
//! `404 Not Found` body.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() {
//! use common::fake_api::FakeApi;
//!
//! let api = FakeApi::start().await.unwrap();
//! api.reply_json("GET", "/api/articles", 200, serde_json::json!({"data": []})).await;
//!
//! // Point HyperTransport at api.api_url()
//! let url = api.api_url();
//! # }
//! ```

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Body served for any path without a canned reply.
pub const NOT_FOUND_BODY: &str =
    r#"{"data":null,"error":{"status":404,"name":"NotFoundError","message":"Not Found","details":{}}}"#;

/// One request as the server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw (still percent-encoded) query string, empty when absent.
    pub query: String,
    pub body: Option<serde_json::Value>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

#[derive(Default)]
struct ApiState {
    replies: HashMap<(String, String), Reply>,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake API server.
pub struct FakeApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeApi {
    /// Start the fake server on a random port. Returns once the server is
    /// listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Server origin (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// CMS-style API root (e.g. `http://127.0.0.1:PORT/api`).
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    /// Answer `method path` with `status` and a raw body.
    pub async fn reply(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.reply_after(method, path, status, body, Duration::ZERO).await;
    }

    pub async fn reply_json(&self, method: &str, path: &str, status: u16, body: serde_json::Value) {
        self.reply(method, path, status, body.to_string()).await;
    }

    /// Like [`reply`](Self::reply) but holds the response back for `delay`.
    pub async fn reply_after(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: impl Into<String>,
        delay: Duration,
    ) {
        let reply = Reply {
            status,
            body: body.into(),
            delay,
        };
        self.state
            .lock()
            .await
            .replies
            .insert((method.to_uppercase(), path.to_string()), reply);
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    /// Requests received for `path`, any method.
    pub async fn hits(&self, path: &str) -> usize {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    pub async fn total_hits(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().await.requests.last().cloned()
    }
}

// ---------------------------------------------------------------------------
// Route handler
// ---------------------------------------------------------------------------

async fn record_and_reply(
    State(state): State<Arc<Mutex<ApiState>>>,
    method: Method,
    headers: axum::http::HeaderMap,
    uri: Uri,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    let reply = {
        let mut state = state.lock().await;
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            query: uri.query().unwrap_or_default().to_string(),
            body: serde_json::from_slice(&body).ok(),
            content_type: headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
        state
            .replies
            .get(&(method.to_string(), path))
            .cloned()
            .unwrap_or(Reply {
                status: 404,
                body: NOT_FOUND_BODY.to_string(),
                delay: Duration::ZERO,
            })
    };

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply.body)
}
