//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, RoomError, ValueObjectError};

/// UseCase の実行エラー
///
/// WebSocket 経由の操作では、いずれのエラーもログに記録されるだけで
/// 送信者には通知されない。HTTP 経由の操作ではステータスコードに変換される。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    /// 入力値が不正
    #[error("validation failed: {0}")]
    Validation(#[from] ValueObjectError),

    /// ルームが存在しない
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// 集計結果が存在しない
    #[error("result not found: {0}")]
    ResultNotFound(String),

    /// ルームの現在の状態では実行できない操作
    #[error("state conflict: {0}")]
    StateConflict(#[from] RoomError),

    /// ユーザー名が他のセッションで使用済み
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// ストアの障害
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<RepositoryError> for UseCaseError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::RoomNotFound(id) => Self::RoomNotFound(id),
            RepositoryError::DuplicateCode(code) => {
                Self::StoreUnavailable(format!("room code collision: {code}"))
            }
            RepositoryError::UsernameTaken(name) => Self::UsernameTaken(name),
            RepositoryError::Unavailable(reason) => Self::StoreUnavailable(reason),
        }
    }
}
