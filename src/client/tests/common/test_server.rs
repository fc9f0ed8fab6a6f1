use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const TRACK_PATH: &str = "/inspector/posthog/v1/track";

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
}

/// In-process stand-in for the ingestion API.
///
/// Answers with the scripted responses in order, then with `200 {"ok":true}`.
pub struct TestServer {
    state: ServerState,
    handle: JoinHandle<()>,
    addr: SocketAddr,
}

async fn track(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(CapturedRequest {
        headers,
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, r#"{"ok":true}"#.to_string()))
}

impl TestServer {
    pub async fn launch(responses: Vec<(StatusCode, &str)>) -> anyhow::Result<Self> {
        let state = ServerState::default();
        state.responses.lock().unwrap().extend(
            responses
                .into_iter()
                .map(|(status, body)| (status, body.to_string())),
        );

        let app = Router::new()
            .route(TRACK_PATH, post(track))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?; // 0: port picked by the OS
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self {
            state,
            handle,
            addr,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}{}", self.addr, TRACK_PATH)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// An endpoint nobody listens on.
pub async fn closed_endpoint() -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}{}", addr, TRACK_PATH))
}
