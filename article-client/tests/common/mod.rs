//! Mock REST service for exercising the client end to end.

#![allow(dead_code)]

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use newsfeed_core::ServiceConfig;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const TEST_API_KEY: &str = "test-anon-key";

/// A request as seen by the mock service.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub query: String,
    pub headers: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decoded query pairs, in request order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn param(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(value: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: value.to_string(),
        }
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
}

pub struct MockService {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockService {
    pub async fn start() -> Self {
        let state = MockState::default();
        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/rest/v1/articles", get(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn config(&self) -> ServiceConfig {
        ServiceConfig::new(format!("http://{}/rest/v1", self.addr), TEST_API_KEY)
    }

    pub async fn enqueue(&self, response: MockResponse) {
        self.state.responses.lock().await.push_back(response);
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().await.clone()
    }
}

impl Drop for MockService {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(
    State(state): State<MockState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let headers = headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();
    state.requests.lock().await.push(CapturedRequest {
        query: query.unwrap_or_default(),
        headers,
    });

    let mock = state
        .responses
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| MockResponse::json(serde_json::json!([])));

    let status = StatusCode::from_u16(mock.status).unwrap();
    (
        status,
        [("content-type", "application/json")],
        mock.body,
    )
        .into_response()
}

pub fn article(post_id: i64, title: &str, category: &str, date: &str) -> serde_json::Value {
    serde_json::json!({
        "post_id": post_id,
        "title": title,
        "category_name": category,
        "date_unparsed": date,
        "image_url": format!("https://cdn.example.com/{post_id}.jpg")
    })
}
