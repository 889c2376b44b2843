//! UseCase: ルームのクローズと集計
//!
//! オーナーによるクローズと、全員の投票完了による自動クローズは
//! どちらもこの `RoomFinalizer` を通る。クローズはストアの条件付き書き込みで行うため、
//! 同時に 2 つのトリガーが発生しても集計結果が作られるのは 1 回だけ。

use std::sync::Arc;

use quikvote_shared::time::Clock;

use crate::domain::{
    OptionName, ResultIdFactory, ResultRepository, Room, RoomBroadcaster, RoomEvent, RoomId,
    RoomRepository, Timestamp, VoteResult, WriteOutcome, tally,
};

use super::error::UseCaseError;

/// ルームをクローズし、集計結果を保存・通知する
pub struct RoomFinalizer {
    room_repository: Arc<dyn RoomRepository>,
    result_repository: Arc<dyn ResultRepository>,
    broadcaster: Arc<dyn RoomBroadcaster>,
    clock: Arc<dyn Clock>,
}

impl RoomFinalizer {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        result_repository: Arc<dyn ResultRepository>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            result_repository,
            broadcaster,
            clock,
        }
    }

    /// ルームをクローズする
    ///
    /// # Returns
    ///
    /// * `Ok(Some(VoteResult))` - このクローズで作成された集計結果
    /// * `Ok(None)` - 既にクローズ済み（他のトリガーが先に適用された）
    /// * `Err(UseCaseError)` - ルームが存在しない、またはストアの障害
    pub async fn finalize(&self, room_id: &RoomId) -> Result<Option<VoteResult>, UseCaseError> {
        let room = match self.room_repository.close(room_id).await? {
            WriteOutcome::Applied(room) => room,
            WriteOutcome::Rejected(e) => {
                tracing::debug!("Close of room '{}' not applied: {}", room_id, e);
                return Ok(None);
            }
        };

        // 閉じた時点で集計を必ず完了させる。呼び出し元（ソケットの読み込みループ）が
        // キャンセルされても、保存と配信は別タスクで最後まで実行される
        let result_repository = self.result_repository.clone();
        let broadcaster = self.broadcaster.clone();
        let created_at = Timestamp::new(self.clock.now_millis());
        let task = tokio::spawn(async move {
            Self::record(room, result_repository, broadcaster, created_at).await
        });
        match task.await {
            Ok(result) => result.map(Some),
            Err(e) => Err(UseCaseError::StoreUnavailable(format!(
                "finalize of room '{room_id}' did not complete: {e}"
            ))),
        }
    }

    async fn record(
        room: Room,
        result_repository: Arc<dyn ResultRepository>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        created_at: Timestamp,
    ) -> Result<VoteResult, UseCaseError> {
        // 誰も投票していなければ順位は空
        let options: &[OptionName] = if room.locked_in_count() == 0 {
            &[]
        } else {
            &room.options
        };
        let ranking = tally(options, room.participants.iter().map(|p| &p.scores));
        let result = VoteResult {
            id: ResultIdFactory::generate(),
            room_id: room.id.clone(),
            owner: room.owner.clone(),
            ranking,
            created_at,
        };
        let result = result_repository.create(result).await?;
        tracing::info!(
            "Room '{}' closed with {} of {} participants locked in, result '{}'",
            room.id,
            room.locked_in_count(),
            room.participants.len(),
            result.id
        );

        broadcaster
            .announce(
                &room,
                RoomEvent::ResultsAvailable {
                    result_id: result.id.clone(),
                },
            )
            .await;
        Ok(result)
    }
}
