//! Room event broadcasting.

use async_trait::async_trait;

use super::{BroadcastReport, OptionName, ResultId, Room};

/// Events announced to every connected participant of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// The full option list after a successful add
    OptionsUpdated { options: Vec<OptionName> },
    /// The room closed and its result was persisted
    ResultsAvailable { result_id: ResultId },
}

/// Fans a room event out to the room's participants.
///
/// Delivery is at-most-once to the sockets connected at send time; there is
/// no replay for sockets that connect later.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    async fn announce(&self, room: &Room, event: RoomEvent) -> BroadcastReport;
}
