//! WebSocket を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続 ID と認証済みユーザー、WebSocket の `UnboundedSender` の対応を管理
//! - ルーム参加者へのメッセージ配信（broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! 送信に失敗した sender は受信側（pusher loop）が既に終了しているため、
//! broadcast の中でその場で登録解除します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastReport, ConnectionId, ConnectionIdFactory, ConnectionRegistry, PusherChannel,
    Username,
};

/// 登録中の 1 接続
///
/// 生存フラグは持たない。登録されていることが生存を意味し、送信に失敗した時点か
/// 読み込みループの終了時に取り除かれる。
struct Connection {
    username: Username,
    channel: PusherChannel,
}

/// WebSocket を使った ConnectionRegistry 実装
///
/// 同じユーザーが複数のタブから接続した場合は、それぞれ別の接続として登録されます。
#[derive(Default)]
pub struct WebSocketConnectionRegistry {
    /// Key: ConnectionId
    /// Value: 接続したユーザーと送信チャンネル
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl WebSocketConnectionRegistry {
    /// 新しい WebSocketConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn register(&self, username: Username, channel: PusherChannel) -> ConnectionId {
        let id = ConnectionIdFactory::generate();
        let mut connections = self.connections.lock().await;
        connections.insert(id.clone(), Connection { username, channel });
        tracing::debug!("Connection '{}' registered ({} total)", id, connections.len());
        id
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered ({} left)", id, connections.len());
        }
        removed
    }

    async fn broadcast(&self, recipients: &[Username], content: &str) -> BroadcastReport {
        let mut connections = self.connections.lock().await;
        let mut report = BroadcastReport::default();
        let mut dead = Vec::new();

        for (id, connection) in connections.iter() {
            if !recipients.contains(&connection.username) {
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            match connection.channel.send(content.to_string()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to push message to connection '{}' ({}): {}",
                        id,
                        connection.username,
                        e
                    );
                    dead.push(id.clone());
                }
            }
        }

        for id in dead {
            connections.remove(&id);
            report.dropped += 1;
        }
        report
    }

    async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketConnectionRegistry の登録・登録解除・配信
    // - 宛先に含まれないユーザーには配信されないこと
    // - 送信に失敗した接続がその場で登録解除されること
    // - 並行した登録・配信・登録解除で接続表が壊れないこと
    //
    // 【なぜこのテストが必要か】
    // - ConnectionRegistry は全ての接続タスクから同時に呼ばれる
    // - 閉じた接続への配信が他の接続への配信を妨げてはならない
    // ========================================

    fn user(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        // テスト項目: 登録した接続を登録解除でき、2 回目は false を返す
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = registry.register(user("alice"), tx).await;

        // when (操作):
        let first = registry.unregister(&id).await;
        let second = registry.unregister(&id).await;

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(registry.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection_of_recipients() {
        // テスト項目: 宛先ユーザーの全ての接続に配信され、それ以外には配信されない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        registry.register(user("alice"), tx1).await;
        registry.register(user("alice"), tx2).await;
        registry.register(user("mallory"), tx3).await;

        // when (操作):
        let report = registry
            .broadcast(&[user("alice"), user("bob")], "hello")
            .await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport { delivered: 2, dropped: 0 });
        assert_eq!(rx1.recv().await, Some("hello".to_string()));
        assert_eq!(rx2.recv().await, Some("hello".to_string()));
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_drops_closed_connection() {
        // テスト項目: 受信側が閉じた接続は配信時に登録解除され、他の接続には届く
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let closed = registry.register(user("alice"), tx1).await;
        registry.register(user("bob"), tx2).await;
        drop(rx1);

        // when (操作):
        let report = registry
            .broadcast(&[user("alice"), user("bob")], "hello")
            .await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport { delivered: 1, dropped: 1 });
        assert_eq!(rx2.recv().await, Some("hello".to_string()));
        assert_eq!(registry.connection_count().await, 1);
        assert!(!registry.unregister(&closed).await);
    }

    #[tokio::test]
    async fn test_broadcast_empty_recipients() {
        // テスト項目: 空の宛先リストでは何も配信されない
        // given (前提条件):
        let registry = WebSocketConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        registry.register(user("alice"), tx).await;

        // when (操作):
        let report = registry.broadcast(&[], "hello").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_register_broadcast_unregister() {
        // テスト項目: 並行した登録・配信・登録解除の後も、生きている接続には全ての配信が届く
        // given (前提条件): 8 接続は最後まで残り、8 接続は途中で登録解除される
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let mut stable = Vec::new();
        let mut leaving = Vec::new();
        for i in 0..16 {
            let (tx, rx) = mpsc::unbounded_channel();
            let id = registry.register(user("alice"), tx).await;
            if i % 2 == 0 {
                leaving.push((id, rx));
            } else {
                stable.push(rx);
            }
        }

        // when (操作): 新規登録・配信・登録解除をワーカースレッド上で同時に走らせる
        let registrations: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    let (tx, rx) = mpsc::unbounded_channel();
                    let id = registry.register(user("alice"), tx).await;
                    (id, rx)
                })
            })
            .collect();
        let broadcasts: Vec<_> = (0..32)
            .map(|n| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry.broadcast(&[user("alice")], &n.to_string()).await
                })
            })
            .collect();
        let unregisters: Vec<_> = leaving
            .iter()
            .map(|(id, _)| {
                let registry = registry.clone();
                let id = id.clone();
                tokio::spawn(async move { registry.unregister(&id).await })
            })
            .collect();
        let mut joined = Vec::new();
        for handle in registrations {
            joined.push(handle.await.unwrap());
        }
        for handle in broadcasts {
            assert_eq!(handle.await.unwrap().dropped, 0);
        }
        for handle in unregisters {
            assert!(handle.await.unwrap());
        }

        // then (期待する結果):
        assert_eq!(registry.connection_count().await, 16);
        for mut rx in stable {
            let mut received = 0;
            while rx.try_recv().is_ok() {
                received += 1;
            }
            assert_eq!(received, 32);
        }
        // 途中で登録された接続には、登録後の配信だけが届く
        for (id, mut rx) in joined {
            let mut received = 0;
            while rx.try_recv().is_ok() {
                received += 1;
            }
            assert!(received <= 32);
            assert!(registry.unregister(&id).await);
        }
        drop(leaving);
    }
}
