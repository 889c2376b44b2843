//! UseCase: 呼び出し元の識別
//!
//! クッキー（またはクエリ）のトークンをセッションストアで引き、ユーザー名を解決する。
//! ユーザー名そのものは認証情報として扱わない。未知のトークンやトークン無しの
//! 呼び出し元には新しい匿名セッションを発行する。

use std::sync::Arc;

use crate::domain::{
    AnonymousUsernameFactory, SessionRepository, SessionToken, SessionTokenFactory, Username,
};

use super::error::UseCaseError;

/// 解決されたセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub username: Username,
    /// このリクエストで新しく発行されたセッションか
    pub issued: bool,
}

/// 呼び出し元識別のユースケース
pub struct AuthenticateUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl AuthenticateUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// トークンからセッションを解決し、解決できなければ匿名セッションを発行する
    pub async fn resolve(&self, token: Option<&str>) -> Result<Session, UseCaseError> {
        let token = token.and_then(|raw| SessionToken::new(raw.to_string()).ok());
        if let Some(token) = token {
            if let Some(username) = self.repository.find_by_token(&token).await? {
                return Ok(Session {
                    token,
                    username,
                    issued: false,
                });
            }
            tracing::debug!("Unknown session token, issuing anonymous session");
        }
        self.issue(AnonymousUsernameFactory::generate()).await
    }

    /// 指定したユーザー名で新しいセッションを発行する
    ///
    /// ユーザー名が他のセッションで使用済みの場合は `UsernameTaken`。
    pub async fn register(&self, username: &str) -> Result<Session, UseCaseError> {
        let username = Username::new(username.to_string())?;
        let session = self.issue(username).await?;
        tracing::info!("Registered user '{}'", session.username);
        Ok(session)
    }

    async fn issue(&self, username: Username) -> Result<Session, UseCaseError> {
        let token = SessionTokenFactory::generate();
        self.repository
            .create(token.clone(), username.clone())
            .await?;
        Ok(Session {
            token,
            username,
            issued: true,
        })
    }
}
