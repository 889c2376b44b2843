//! UseCase: オーナーによるルームのクローズ

use std::sync::Arc;

use crate::domain::{RoomError, RoomId, RoomRepository, Username, VoteResult};

use super::{error::UseCaseError, finalize_room::RoomFinalizer};

/// オーナーによるクローズのユースケース
pub struct CloseRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    finalizer: Arc<RoomFinalizer>,
}

impl CloseRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, finalizer: Arc<RoomFinalizer>) -> Self {
        Self {
            repository,
            finalizer,
        }
    }

    /// ルームのクローズを実行
    ///
    /// # Returns
    ///
    /// * `Ok(VoteResult)` - クローズ時に作成された集計結果
    /// * `Err(UseCaseError::StateConflict)` - オーナーでない、またはクローズ済み
    pub async fn execute(
        &self,
        room_id: &str,
        sender: &Username,
    ) -> Result<VoteResult, UseCaseError> {
        let room_id = RoomId::new(room_id.to_string())?;
        let room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound(room_id.to_string()))?;
        if !room.is_owner(sender) {
            return Err(RoomError::NotOwner(sender.to_string()).into());
        }

        self.finalizer
            .finalize(&room_id)
            .await?
            .ok_or(UseCaseError::StateConflict(RoomError::RoomClosed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ResultRepository, RoomState},
        usecase::test_support::{Fixture, user},
    };

    fn usecase(fx: &Fixture) -> CloseRoomUseCase {
        CloseRoomUseCase::new(fx.rooms.clone(), fx.finalizer())
    }

    #[tokio::test]
    async fn test_owner_closes_room() {
        // テスト項目: オーナーはルームをクローズでき、参加者全員に results-available が届く
        // given (前提条件):
        let fx = Fixture::new().await;
        fx.join("bob").await;
        fx.add_option("pizza").await;
        fx.vote("bob", &[("pizza", 3)]).await;
        let mut bob = fx.connect("bob").await;

        // when (操作):
        let result = usecase(&fx)
            .execute(fx.room_id.as_str(), &user("alice"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(fx.room().await.state, RoomState::Closed);
        assert_eq!(result.ranking.len(), 1);
        assert_eq!(result.ranking[0].total, 3);
        assert_eq!(
            bob.frames(),
            vec![serde_json::json!({"type": "results-available", "id": result.id.as_str()})]
        );
    }

    #[tokio::test]
    async fn test_non_owner_cannot_close() {
        // テスト項目: オーナー以外はルームをクローズできない
        // given (前提条件):
        let fx = Fixture::new().await;
        fx.join("bob").await;
        let mut alice = fx.connect("alice").await;

        // when (操作):
        let result = usecase(&fx).execute(fx.room_id.as_str(), &user("bob")).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            UseCaseError::StateConflict(RoomError::NotOwner("bob".to_string()))
        );
        assert_eq!(fx.room().await.state, RoomState::Open);
        assert!(alice.frames().is_empty());
    }

    #[tokio::test]
    async fn test_second_close_is_rejected_without_broadcast() {
        // テスト項目: 2 回目のクローズは RoomClosed で拒否され、何も配信されない
        // given (前提条件):
        let fx = Fixture::new().await;
        let usecase = usecase(&fx);
        let mut alice = fx.connect("alice").await;
        usecase
            .execute(fx.room_id.as_str(), &user("alice"))
            .await
            .unwrap();
        alice.frames();

        // when (操作):
        let result = usecase.execute(fx.room_id.as_str(), &user("alice")).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            UseCaseError::StateConflict(RoomError::RoomClosed)
        );
        assert!(alice.frames().is_empty());
        let history = fx.results.list_by_owner(&user("alice")).await.unwrap();
        assert_eq!(history.len(), 1);
    }
}
