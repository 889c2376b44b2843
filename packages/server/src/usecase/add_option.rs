//! UseCase: 選択肢の追加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AddOptionUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 追加後の選択肢一覧が参加者全員に配信されることを保証
//! - 拒否された追加が配信されないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者による新しい選択肢の追加
//! - 異常系：重複、非参加者、クローズ済みルーム、不正な入力

use std::sync::Arc;

use crate::domain::{
    OptionName, Room, RoomBroadcaster, RoomError, RoomEvent, RoomId, RoomRepository, Username,
};

use super::error::UseCaseError;

/// 選択肢追加のユースケース
pub struct AddOptionUseCase {
    repository: Arc<dyn RoomRepository>,
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl AddOptionUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self {
            repository,
            broadcaster,
        }
    }

    /// 選択肢の追加を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（未検証の文字列）
    /// * `sender` - 操作したユーザー
    /// * `option` - 追加する選択肢（未検証の文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 追加後のルーム（このルームの選択肢一覧が配信済み）
    /// * `Err(UseCaseError)` - 追加されなかった（配信もされない）
    pub async fn execute(
        &self,
        room_id: &str,
        sender: &Username,
        option: &str,
    ) -> Result<Room, UseCaseError> {
        let room_id = RoomId::new(room_id.to_string())?;
        let option = OptionName::new(option.to_string())?;

        // 参加者は増える一方なので、この時点の判定は書き込み時にも有効
        let room = self
            .repository
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| UseCaseError::RoomNotFound(room_id.to_string()))?;
        if !room.has_participant(sender) {
            return Err(RoomError::NotParticipant(sender.to_string()).into());
        }

        let room = self
            .repository
            .add_option(&room_id, &option)
            .await?
            .into_result()?;
        tracing::debug!("'{}' added option '{}' to room '{}'", sender, option, room.id);

        self.broadcaster
            .announce(
                &room,
                RoomEvent::OptionsUpdated {
                    options: room.options.clone(),
                },
            )
            .await;
        Ok(room)
    }
}
