//! UseCase: ルーム参加処理

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository, Username};

use super::error::UseCaseError;

/// コードでルームに参加するユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// 既に参加しているユーザーが再度参加しても成功扱い（変更なし）。
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 参加後のルーム
    /// * `Err(UseCaseError::RoomNotFound)` - コードに対応するルームが無い
    /// * `Err(UseCaseError::StateConflict)` - ルームがクローズ済み
    pub async fn execute(&self, code: &str, username: Username) -> Result<Room, UseCaseError> {
        let code = RoomCode::new(code.to_string())?;
        let room = self
            .repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound(code.to_string()))?;

        let room = self
            .repository
            .add_participant(&room.id, &username)
            .await?
            .into_result()?;
        tracing::info!("'{}' joined room '{}' ({})", username, room.id, room.code);
        Ok(room)
    }
}
