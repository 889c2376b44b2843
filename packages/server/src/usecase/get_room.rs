//! UseCase: ルームの取得

use std::sync::Arc;

use crate::domain::{Room, RoomError, RoomId, RoomRepository};

use super::error::UseCaseError;

/// ルーム取得のユースケース
///
/// 投票画面はルームが Open の間だけ表示できるため、クローズ済みのルームは
/// `StateConflict(RoomClosed)` として返す。
pub struct GetRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &str) -> Result<Room, UseCaseError> {
        let room_id = RoomId::new(room_id.to_string())?;
        let room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound(room_id.to_string()))?;
        if !room.is_open() {
            return Err(RoomError::RoomClosed.into());
        }
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::RoomIdFactory, usecase::test_support::Fixture};

    #[tokio::test]
    async fn test_get_open_room() {
        // テスト項目: Open なルームを取得できる
        // given (前提条件):
        let fx = Fixture::new().await;
        fx.add_option("pizza").await;
        let usecase = GetRoomUseCase::new(fx.rooms.clone());

        // when (操作):
        let room = usecase.execute(fx.room_id.as_str()).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.id, fx.room_id);
        assert_eq!(room.options.len(), 1);
    }

    #[tokio::test]
    async fn test_get_closed_room_is_conflict() {
        // テスト項目: クローズ済みのルームは StateConflict になる
        // given (前提条件):
        let fx = Fixture::new().await;
        fx.rooms.close(&fx.room_id).await.unwrap();
        let usecase = GetRoomUseCase::new(fx.rooms.clone());

        // when (操作):
        let result = usecase.execute(fx.room_id.as_str()).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            UseCaseError::StateConflict(RoomError::RoomClosed)
        );
    }

    #[tokio::test]
    async fn test_get_unknown_room_is_not_found() {
        // テスト項目: 存在しないルームは RoomNotFound になる
        // given (前提条件):
        let fx = Fixture::new().await;
        let usecase = GetRoomUseCase::new(fx.rooms.clone());
        let unknown = RoomIdFactory::generate();

        // when (操作):
        let result = usecase.execute(unknown.as_str()).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            UseCaseError::RoomNotFound(unknown.to_string())
        );
    }
}
