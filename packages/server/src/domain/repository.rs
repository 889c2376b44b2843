//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    OptionName, RepositoryError, ResultId, Room, RoomCode, RoomError, RoomId, ScoreSheet,
    SessionToken, Username, VoteResult,
};

/// 条件付き書き込みの結果
///
/// 前提条件（ルームが Open である、未投票である等）を満たして実際に適用された場合は
/// 変更後の Room を返し、満たさなかった場合は拒否理由を返す。
/// 呼び出し側は `Rejected` を成功として扱ってはならない。
#[derive(Debug, Clone)]
pub enum WriteOutcome {
    /// 適用された（変更後の Room）
    Applied(Room),
    /// 前提条件を満たさず適用されなかった
    Rejected(RoomError),
}

impl WriteOutcome {
    /// 適用されたかどうか
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// `Result` に変換する
    pub fn into_result(self) -> Result<Room, RoomError> {
        match self {
            Self::Applied(room) => Ok(room),
            Self::Rejected(e) => Err(e),
        }
    }
}

/// Room Repository trait
///
/// ルームの状態を保持するストアへのインターフェース。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 条件付き書き込み
///
/// `add_participant` / `add_option` / `submit_votes` / `close` は
/// 「読み取り→判定→書き込み」をストア内で不可分に行う。
/// 並行する接続からの操作がどの順序で到着しても、前提条件を満たさない書き込みは
/// `WriteOutcome::Rejected` になる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 新しい Room を保存する（Open なルームとコードが重複する場合はエラー）
    async fn create(&self, room: Room) -> Result<Room, RepositoryError>;

    /// ID で Room を取得
    async fn find_by_id(&self, id: &RoomId) -> Result<Option<Room>, RepositoryError>;

    /// コードで Room を取得（同じコードの Room が複数ある場合は Open なものを優先）
    async fn find_by_code(&self, code: &RoomCode) -> Result<Option<Room>, RepositoryError>;

    /// 参加者を追加（Open の場合のみ、既存参加者なら変更なしで適用扱い）
    async fn add_participant(
        &self,
        id: &RoomId,
        username: &Username,
    ) -> Result<WriteOutcome, RepositoryError>;

    /// 選択肢を追加（Open かつ未登録の場合のみ）
    async fn add_option(
        &self,
        id: &RoomId,
        option: &OptionName,
    ) -> Result<WriteOutcome, RepositoryError>;

    /// 参加者のスコアを確定（Open かつ未投票の場合のみ）
    async fn submit_votes(
        &self,
        id: &RoomId,
        username: &Username,
        scores: ScoreSheet,
    ) -> Result<WriteOutcome, RepositoryError>;

    /// ルームをクローズ（Open の場合のみ）
    async fn close(&self, id: &RoomId) -> Result<WriteOutcome, RepositoryError>;
}

/// Result Repository trait
///
/// 集計結果の保存先。追記のみで、更新・削除は行わない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// 集計結果を保存
    async fn create(&self, result: VoteResult) -> Result<VoteResult, RepositoryError>;

    /// ID で集計結果を取得
    async fn find_by_id(&self, id: &ResultId) -> Result<Option<VoteResult>, RepositoryError>;

    /// オーナーの集計結果を新しい順に取得
    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<VoteResult>, RepositoryError>;
}

/// Session Repository trait
///
/// セッショントークンとユーザー名の対応表。ユーザー名は 1 つのセッションにしか紐付かない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを保存（ユーザー名が使用済みなら `UsernameTaken`）
    async fn create(&self, token: SessionToken, username: Username)
    -> Result<(), RepositoryError>;

    /// トークンからユーザー名を取得
    async fn find_by_token(&self, token: &SessionToken)
    -> Result<Option<Username>, RepositoryError>;
}
