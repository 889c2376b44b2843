//! UseCase: 投票の確定
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LockInVoteUseCase::execute() メソッド
//! - 全員が投票した瞬間の自動クローズ
//!
//! ### なぜこのテストが必要か
//! - 最初の投票のみが有効で、2 回目は集計に影響しないことを保証
//! - results-available がちょうど 1 回だけ配信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：投票、最後の参加者の投票による自動クローズ
//! - 異常系：二重投票、非参加者、クローズ済みルーム
//! - 並行：最後の 2 人が同時に投票する

use std::sync::Arc;

use crate::domain::{
    OptionName, RoomError, RoomId, RoomRepository, Score, ScoreSheet, Username, VoteResult,
};

use super::{error::UseCaseError, finalize_room::RoomFinalizer};

/// 投票確定の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockInOutcome {
    /// 投票は記録され、ルームはまだ Open
    Recorded,
    /// この投票で全員が揃い、ルームがクローズされた
    Closed(VoteResult),
}

/// 投票確定のユースケース
pub struct LockInVoteUseCase {
    repository: Arc<dyn RoomRepository>,
    finalizer: Arc<RoomFinalizer>,
}

impl LockInVoteUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, finalizer: Arc<RoomFinalizer>) -> Self {
        Self {
            repository,
            finalizer,
        }
    }

    /// 投票の確定を実行
    ///
    /// スコアは 0 方向に切り捨てた上で 0..=10 に丸める。ルームに存在しない選択肢への
    /// スコアは破棄され、スコアの無い選択肢は 0 点として記録される。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルームの ID（未検証の文字列）
    /// * `sender` - 投票したユーザー
    /// * `votes` - 選択肢名とスコアの組
    pub async fn execute<I>(
        &self,
        room_id: &str,
        sender: &Username,
        votes: I,
    ) -> Result<LockInOutcome, UseCaseError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let room_id = RoomId::new(room_id.to_string())?;
        let mut scores = ScoreSheet::new();
        for (name, value) in votes {
            // 空の選択肢名はどのルームにも存在しないため破棄される
            let Ok(option) = OptionName::new(name) else {
                continue;
            };
            scores.insert(option, Score::coerce(value)?);
        }

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
            .submit_votes(&room_id, sender, scores)
            .await?
            .into_result()?;
        tracing::debug!(
            "'{}' locked in on room '{}' ({}/{})",
            sender,
            room.id,
            room.locked_in_count(),
            room.participants.len()
        );

        if !room.all_locked_in() {
            return Ok(LockInOutcome::Recorded);
        }
        match self.finalizer.finalize(&room.id).await? {
            Some(result) => Ok(LockInOutcome::Closed(result)),
            // オーナーのクローズが先に適用された
            None => Ok(LockInOutcome::Recorded),
        }
    }
}
