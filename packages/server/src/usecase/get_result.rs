//! UseCase: 集計結果の取得

use std::sync::Arc;

use crate::domain::{ResultId, ResultRepository, Username, VoteResult};

use super::error::UseCaseError;

/// 集計結果取得のユースケース
pub struct GetResultUseCase {
    repository: Arc<dyn ResultRepository>,
}

impl GetResultUseCase {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self { repository }
    }

    /// ID で集計結果を取得
    ///
    /// 結果 ID を知っていれば誰でも閲覧できる（共有リンク）。
    pub async fn execute(&self, result_id: &str) -> Result<VoteResult, UseCaseError> {
        let result_id = ResultId::new(result_id.to_string())?;
        self.repository
            .find_by_id(&result_id)
            .await?
            .ok_or_else(|| UseCaseError::ResultNotFound(result_id.to_string()))
    }
}

/// 投票履歴取得のユースケース
pub struct GetHistoryUseCase {
    repository: Arc<dyn ResultRepository>,
}

impl GetHistoryUseCase {
    pub fn new(repository: Arc<dyn ResultRepository>) -> Self {
        Self { repository }
    }

    /// `owner` がオーナーだったルームの集計結果を新しい順に取得
    pub async fn execute(&self, owner: &Username) -> Result<Vec<VoteResult>, UseCaseError> {
        Ok(self.repository.list_by_owner(owner).await?)
    }
}
