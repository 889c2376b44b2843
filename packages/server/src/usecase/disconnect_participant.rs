//! UseCase: ソケット切断処理
//!
//! 読み取りエラー・クローズ・明示的な切断のいずれでも、接続タスクの終了時に必ず呼ばれる。
//! 配信時に既に登録解除されている場合もあるため、存在しない接続の登録解除は正常系。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 接続解除のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続解除を実行
    ///
    /// # Returns
    ///
    /// 接続がまだ登録されていた場合は true
    pub async fn execute(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.registry.unregister(connection_id).await;
        if removed {
            tracing::info!("Connection '{}' disconnected", connection_id);
        } else {
            tracing::debug!("Connection '{}' was already unregistered", connection_id);
        }
        removed
    }
}
