//! UseCase: ソケット接続処理
//!
//! 接続は認証済みのユーザーに紐づけて登録される。どのルームの配信を受けるかは
//! 配信時のルームの参加者一覧で決まるため、接続時にルームは指定しない。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, PusherChannel, Username};

/// 接続登録のユースケース
pub struct ConnectParticipantUseCase {
    /// ConnectionRegistry（接続管理の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続登録を実行
    ///
    /// # Arguments
    ///
    /// * `username` - 接続したユーザー
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 登録解除に使う接続 ID
    pub async fn execute(&self, username: Username, sender: PusherChannel) -> ConnectionId {
        let connection_id = self.registry.register(username.clone(), sender).await;
        tracing::info!("'{}' connected as '{}'", username, connection_id);
        connection_id
    }
}
