//! Shared helpers for the integration tests.
//!
//! Every test gets its own server bound to an ephemeral port, backed by
//! fresh in-memory stores.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use quikvote_server::ui::{AppState, Server};
use quikvote_shared::time::SystemClock;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on how long a test waits for a broadcast frame
const FRAME_TIMEOUT: Duration = Duration::from_secs(2);

/// Start a server in the background and return its address
pub async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let app = Server::new(AppState::in_memory(Arc::new(SystemClock))).router();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    addr
}

/// HTTP client that always presents the given session token as a cookie
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl ApiClient {
    /// Client presenting an arbitrary token, registered or not
    pub fn with_token(addr: SocketAddr, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("http://{}", addr),
            token: token.to_string(),
        }
    }

    /// Claim `username` and keep the session token the server issued for it
    pub async fn register(addr: SocketAddr, username: &str) -> Self {
        let response = reqwest::Client::new()
            .post(format!("http://{}/api/register", addr))
            .json(&serde_json::json!({ "username": username }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let token = token_from_set_cookie(&response).expect("register sets a token cookie");
        Self::with_token(addr, &token)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(format!("{}{}", self.base, path))
            .header(reqwest::header::COOKIE, format!("token={}", self.token))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str) -> reqwest::Response {
        self.http
            .post(format!("{}{}", self.base, path))
            .header(reqwest::header::COOKIE, format!("token={}", self.token))
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.http
            .post(format!("{}{}", self.base, path))
            .header(reqwest::header::COOKIE, format!("token={}", self.token))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Create a room and return `(id, code)`
    pub async fn create_room(&self) -> (String, String) {
        let body: Value = self.post("/api/room").await.json().await.unwrap();
        (
            body["id"].as_str().unwrap().to_string(),
            body["code"].as_str().unwrap().to_string(),
        )
    }

    pub async fn join(&self, code: &str) -> reqwest::Response {
        self.post(&format!("/api/room/{}/join", code)).await
    }
}

/// Token carried by a `Set-Cookie: token=...` response header
pub fn token_from_set_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| cookie.strip_prefix("token="))
        .and_then(|rest| rest.split(';').next())
        .map(str::to_string)
}

/// Open a WebSocket as `token`.
///
/// The connection is registered after the upgrade completes, so give the
/// server a moment before anything is broadcast to it.
pub async fn connect_ws(addr: SocketAddr, token: &str) -> WsStream {
    let (ws, _) = connect_async(format!("ws://{}/ws?token={}", addr, token))
        .await
        .expect("Failed to connect WebSocket");
    tokio::time::sleep(Duration::from_millis(100)).await;
    ws
}

pub async fn send_json(ws: &mut WsStream, frame: Value) {
    ws.send(Message::Text(frame.to_string().into()))
        .await
        .expect("Failed to send frame");
}

/// Wait for the next text frame and decode it
pub async fn next_frame(ws: &mut WsStream) -> Value {
    loop {
        let msg = tokio::time::timeout(FRAME_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("WebSocket closed")
            .expect("WebSocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("Frame is not JSON");
        }
    }
}

/// Assert that nothing arrives within a short window
pub async fn assert_silent(ws: &mut WsStream) {
    let result = tokio::time::timeout(Duration::from_millis(200), ws.next()).await;
    assert!(result.is_err(), "unexpected frame: {:?}", result);
}
