//! Connection registry trait 定義
//!
//! 接続中のソケットを管理し、ルーム参加者へのメッセージ配信を行うインターフェース。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, Username};

/// ソケットへの送信チャンネル
///
/// 受信側は UI 層の pusher loop が保持し、WebSocket に書き出す。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ブロードキャストの配信結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 送信できた接続数
    pub delivered: usize,
    /// 送信に失敗し、登録解除された接続数
    pub dropped: usize,
}

/// Connection Registry trait
///
/// 全ての操作は並行する接続タスクから呼ばれるため、実装は内部で同期を取る必要がある。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 認証済みユーザーに紐づく接続を登録し、接続 ID を返す
    async fn register(&self, username: Username, channel: PusherChannel) -> ConnectionId;

    /// 接続を登録解除（存在しない場合は false）
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// `recipients` に含まれるユーザーの全ての接続へ `content` を送信する
    ///
    /// 一部の接続への送信失敗は他の接続への配信を妨げない（ベストエフォート）。
    async fn broadcast(&self, recipients: &[Username], content: &str) -> BroadcastReport;

    /// 登録中の接続数
    async fn connection_count(&self) -> usize;
}
