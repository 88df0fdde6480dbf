use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::task::JoinHandle;

pub const MOCK_BASE_PATH: &str = "/i-am-a-mock-base";

/// A request captured by the mock plugin
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Request body is not JSON")
    }
}

#[derive(Clone, Default)]
struct MockState {
    queued: Arc<Mutex<VecDeque<(StatusCode, String)>>>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for a plugin backend that serves
/// `POST <base>/permissions/apply-conditions`.
///
/// Answers `{"result":"ALLOW"}` unless a response was queued with `respond_once`.
pub struct MockPlugin {
    addr: std::net::SocketAddr,
    state: MockState,
    handle: JoinHandle<()>,
}

impl MockPlugin {
    pub async fn start() -> Self {
        let state = MockState::default();
        let router = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock plugin");
        let addr = listener.local_addr().expect("No local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Mock plugin failed");
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    /// Host root, e.g. `http://127.0.0.1:41234`
    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL discovery should hand out for the mocked plugin
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin(), MOCK_BASE_PATH)
    }

    pub fn respond_once(&self, status: StatusCode, body: &str) {
        self.state
            .queued
            .lock()
            .unwrap()
            .push_back((status, body.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().unwrap().clone()
    }
}

impl Drop for MockPlugin {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    state.recorded.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        headers,
        body,
    });

    if path != format!("{MOCK_BASE_PATH}/permissions/apply-conditions") {
        return (StatusCode::NOT_FOUND, "not found".to_string());
    }

    let queued = state.queued.lock().unwrap().pop_front();
    queued.unwrap_or((StatusCode::OK, r#"{"result":"ALLOW"}"#.to_string()))
}
