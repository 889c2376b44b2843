//! ConnectionRegistry を使った RoomBroadcaster 実装
//!
//! ドメインのイベントを送信フレームの JSON にエンコードし、
//! ルームの参加者全員の接続へ配信します。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{BroadcastReport, ConnectionRegistry, Room, RoomBroadcaster, RoomEvent},
    infrastructure::dto::websocket::OutboundEvent,
};

/// Registry-backed broadcaster
pub struct RegistryBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
}

impl RegistryBroadcaster {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl RoomBroadcaster for RegistryBroadcaster {
    async fn announce(&self, room: &Room, event: RoomEvent) -> BroadcastReport {
        let frame = OutboundEvent::from(event);
        let content = match serde_json::to_string(&frame) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Failed to encode outbound frame for room '{}': {}", room.id, e);
                return BroadcastReport::default();
            }
        };

        let recipients = room.participant_usernames();
        let report = self.registry.broadcast(&recipients, &content).await;
        tracing::debug!(
            "Announced {} to room '{}': delivered={}, dropped={}",
            content,
            room.id,
            report.delivered,
            report.dropped
        );
        report
    }
}
