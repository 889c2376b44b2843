//! InMemory Result Repository 実装
//!
//! 集計結果は追記のみ。挿入順を保持する `Vec` に保存します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, ResultId, ResultRepository, Username, VoteResult};

/// インメモリ Result Repository 実装
#[derive(Default)]
pub struct InMemoryResultRepository {
    results: Mutex<Vec<VoteResult>>,
}

impl InMemoryResultRepository {
    /// 新しい InMemoryResultRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn create(&self, result: VoteResult) -> Result<VoteResult, RepositoryError> {
        let mut results = self.results.lock().await;
        results.push(result.clone());
        Ok(result)
    }

    async fn find_by_id(&self, id: &ResultId) -> Result<Option<VoteResult>, RepositoryError> {
        let results = self.results.lock().await;
        Ok(results.iter().find(|r| &r.id == id).cloned())
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<VoteResult>, RepositoryError> {
        let results = self.results.lock().await;
        let mut owned: Vec<VoteResult> = results
            .iter()
            .filter(|r| &r.owner == owner)
            .cloned()
            .collect();
        // 同一ミリ秒の結果は後から保存したものが先
        owned.reverse();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }
}
