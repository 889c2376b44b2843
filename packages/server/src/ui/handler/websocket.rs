//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::Username,
    ui::{auth::Identity, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> impl IntoResponse {
    let username = identity.username.clone();
    tracing::debug!("WebSocket upgrade requested by '{}'", username);
    let response = ws.on_upgrade(move |socket| handle_socket(socket, state, username));
    (identity, response)
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: room events broadcast by other
/// connections (via rx channel) are sent to this client's WebSocket connection.
///
/// # Arguments
///
/// * `rx` - Channel receiver for broadcast frames
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, username: Username) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state
        .connect_participant_usecase
        .execute(username.clone(), tx)
        .await;

    let state_clone = state.clone();
    let username_clone = username.clone();

    // Frames of one connection are handled strictly in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error for '{}': {}", username_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    state_clone
                        .dispatcher
                        .handle_frame(&username_clone, text.as_str())
                        .await;
                }
                Message::Binary(_) => {
                    tracing::warn!("Dropping binary frame from '{}'", username_clone);
                }
                Message::Close(_) => {
                    tracing::debug!("'{}' requested close", username_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // The pusher can be aborted at any point. The read loop is never aborted,
    // so a frame that is being handled always runs to completion; once the
    // client is gone its next read fails and the loop ends on its own.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            if let Err(e) = (&mut recv_task).await {
                tracing::error!("Read loop for '{}' failed: {}", username, e);
            }
        }
    };

    state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await;
}
