//! Voting server UI layer: HTTP/WebSocket endpoints and their wiring.

pub mod auth;
pub mod dispatcher;
mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
