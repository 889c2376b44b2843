//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        add_option, close_room, create_room, get_history, get_result, get_room, health_check,
        join_room, lock_in, me, register, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Voting room server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::in_memory(Arc::new(SystemClock)));
/// server.run("127.0.0.1".to_string(), 4000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with every HTTP and WebSocket endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/register", post(register))
            .route("/api/me", get(me))
            .route("/api/room", post(create_room))
            // 参加のみ {id} の位置にルームコードを受け取る
            .route("/api/room/{id}/join", post(join_room))
            .route("/api/room/{id}", get(get_room))
            .route("/api/room/{id}/options", post(add_option))
            .route("/api/room/{id}/lockin", post(lock_in))
            .route("/api/room/{id}/close", post(close_room))
            .route("/api/results/{id}", get(get_result))
            .route("/api/history", get(get_history))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the voting room server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 4000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Voting server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
