//! 接続レジストリの実装
//!
//! ## 概要
//!
//! このモジュールは `ConnectionRegistry` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: WebSocket の送信チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketConnectionRegistry;
