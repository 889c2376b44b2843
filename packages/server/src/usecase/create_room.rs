//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 作成者がオーナー兼唯一の参加者になることを保証
//! - ルームコードの衝突時に再生成されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成
//! - 異常系：コードが衝突し続ける、ストアが利用できない

use std::sync::Arc;

use quikvote_shared::time::Clock;

use crate::domain::{
    RepositoryError, Room, RoomCodeFactory, RoomIdFactory, RoomRepository, Timestamp, Username,
};

use super::error::UseCaseError;

/// コードの衝突時に再生成する最大回数
pub const MAX_CODE_ATTEMPTS: usize = 8;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `owner` - ルームを作成するユーザー
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルーム（オーナーが唯一の参加者）
    /// * `Err(UseCaseError)` - 作成失敗
    pub async fn execute(&self, owner: Username) -> Result<Room, UseCaseError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let room = Room::new(
                RoomIdFactory::generate(),
                RoomCodeFactory::generate(),
                owner.clone(),
                Timestamp::new(self.clock.now_millis()),
            );
            match self.repository.create(room).await {
                Ok(room) => {
                    tracing::info!("Room '{}' ({}) created by '{}'", room.id, room.code, owner);
                    return Ok(room);
                }
                Err(RepositoryError::DuplicateCode(code)) => {
                    tracing::debug!("Room code '{}' already in use (attempt {})", code, attempt);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(UseCaseError::StoreUnavailable(format!(
            "no free room code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }
}
