//! Conversion logic between DTOs and domain entities.
//!
//! Only the domain → DTO direction exists: inbound frames are validated
//! field by field in the use cases, where a failure is a value error
//! rather than a panic.

use quikvote_shared::time::timestamp_to_rfc3339;

use crate::domain::{Participant, RoomEvent, RoomState, VoteResult};
use crate::infrastructure::dto::{http, websocket};

// ========================================
// Domain → WebSocket DTO
// ========================================

impl From<RoomEvent> for websocket::OutboundEvent {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::OptionsUpdated { options } => Self::Options {
                options: options.into_iter().map(|o| o.into_string()).collect(),
            },
            RoomEvent::ResultsAvailable { result_id } => Self::ResultsAvailable {
                id: result_id.into_string(),
            },
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<Participant> for http::ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            username: model.username.into_string(),
            locked_in: model.locked_in,
        }
    }
}

impl From<VoteResult> for http::ResultDto {
    fn from(model: VoteResult) -> Self {
        let (results, totals) = model
            .ranking
            .into_iter()
            .map(|r| (r.option.into_string(), r.total))
            .unzip();
        Self {
            id: model.id.into_string(),
            room_id: model.room_id.into_string(),
            owner: model.owner.into_string(),
            results,
            totals,
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

pub fn room_state_label(state: RoomState) -> &'static str {
    match state {
        RoomState::Open => "open",
        RoomState::Closed => "closed",
    }
}
