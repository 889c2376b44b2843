//! InMemory Session Repository 実装
//!
//! トークン→ユーザー名の対応と、使用済みユーザー名の集合を 1 つの Mutex で保護します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, SessionRepository, SessionToken, Username};

#[derive(Default)]
struct Sessions {
    by_token: HashMap<SessionToken, Username>,
    usernames: HashSet<Username>,
}

/// インメモリ Session Repository 実装
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<Sessions>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(
        &self,
        token: SessionToken,
        username: Username,
    ) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.lock().await;
        if !sessions.usernames.insert(username.clone()) {
            return Err(RepositoryError::UsernameTaken(username.into_string()));
        }
        sessions.by_token.insert(token, username);
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Username>, RepositoryError> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.by_token.get(token).cloned())
    }
}
