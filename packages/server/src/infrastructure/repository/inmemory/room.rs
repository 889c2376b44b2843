//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 不可分性
//!
//! 全てのルームを 1 つの `Mutex` で保護し、条件付き書き込みは
//! ロックを保持したまま「判定→変更→変更後の状態のコピー」を行います。
//! そのため、並行する接続からの書き込みが交互に実行されることはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    OptionName, RepositoryError, Room, RoomCode, RoomError, RoomId, RoomRepository, ScoreSheet,
    Username, WriteOutcome,
};

/// インメモリ Room Repository 実装
///
/// Room ドメインモデルを保持し、ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// Room ID → Room
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ロックを保持したまま `mutate` を適用する
    ///
    /// ドメインモデルの変更メソッドは失敗時に状態を変更しないため、
    /// `Rejected` の場合ルームは元のまま残る。
    async fn apply<F>(&self, id: &RoomId, mutate: F) -> Result<WriteOutcome, RepositoryError>
    where
        F: FnOnce(&mut Room) -> Result<(), RoomError> + Send,
    {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(id)
            .ok_or_else(|| RepositoryError::RoomNotFound(id.to_string()))?;

        Ok(match mutate(room) {
            Ok(()) => WriteOutcome::Applied(room.clone()),
            Err(e) => WriteOutcome::Rejected(e),
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let code_in_use = rooms
            .values()
            .any(|existing| existing.is_open() && existing.code == room.code);
        if code_in_use {
            return Err(RepositoryError::DuplicateCode(room.code.into_string()));
        }
        rooms.insert(room.id.clone(), room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(id).cloned())
    }

    async fn find_by_code(&self, code: &RoomCode) -> Result<Option<Room>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        let room = rooms
            .values()
            .filter(|room| &room.code == code)
            .max_by_key(|room| (room.is_open(), room.created_at));
        Ok(room.cloned())
    }

    async fn add_participant(
        &self,
        id: &RoomId,
        username: &Username,
    ) -> Result<WriteOutcome, RepositoryError> {
        let username = username.clone();
        self.apply(id, move |room| room.add_participant(username).map(|_| ()))
            .await
    }

    async fn add_option(
        &self,
        id: &RoomId,
        option: &OptionName,
    ) -> Result<WriteOutcome, RepositoryError> {
        let option = option.clone();
        self.apply(id, move |room| room.add_option(option)).await
    }

    async fn submit_votes(
        &self,
        id: &RoomId,
        username: &Username,
        scores: ScoreSheet,
    ) -> Result<WriteOutcome, RepositoryError> {
        self.apply(id, move |room| room.lock_in(username, scores))
            .await
    }

    async fn close(&self, id: &RoomId) -> Result<WriteOutcome, RepositoryError> {
        self.apply(id, Room::close).await
    }
}
