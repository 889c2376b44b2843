//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    add_option, close_room, create_room, get_history, get_result, get_room, health_check,
    join_room, lock_in, me, register,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
