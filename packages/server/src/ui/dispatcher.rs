//! Inbound socket event dispatch.
//!
//! Each text frame is decoded once into an [`InboundEvent`] and routed to the
//! matching use case. The protocol is fire-and-forget: a frame that fails to
//! decode or that the room rejects is logged and dropped, the connection
//! stays open and nothing is sent back to the sender.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    domain::Username,
    infrastructure::dto::websocket::InboundEvent,
    usecase::{AddOptionUseCase, CloseRoomUseCase, LockInOutcome, LockInVoteUseCase, UseCaseError},
};

/// Why a frame was dropped
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{kind} on room '{room}' failed: {source}")]
    Rejected {
        kind: &'static str,
        room: String,
        source: UseCaseError,
    },
}

/// Routes decoded socket events to the room use cases
pub struct EventDispatcher {
    add_option_usecase: Arc<AddOptionUseCase>,
    lock_in_vote_usecase: Arc<LockInVoteUseCase>,
    close_room_usecase: Arc<CloseRoomUseCase>,
}

impl EventDispatcher {
    pub fn new(
        add_option_usecase: Arc<AddOptionUseCase>,
        lock_in_vote_usecase: Arc<LockInVoteUseCase>,
        close_room_usecase: Arc<CloseRoomUseCase>,
    ) -> Self {
        Self {
            add_option_usecase,
            lock_in_vote_usecase,
            close_room_usecase,
        }
    }

    /// Decode and handle one frame, logging any failure.
    pub async fn handle_frame(&self, sender: &Username, frame: &str) {
        match self.dispatch(sender, frame).await {
            Ok(()) => {}
            Err(DispatchError::Decode(e)) => {
                tracing::warn!("Dropping malformed frame from '{}': {}", sender, e);
            }
            Err(e @ DispatchError::Rejected {
                source: UseCaseError::StoreUnavailable(_),
                ..
            }) => {
                tracing::error!("Dropping frame from '{}': {}", sender, e);
            }
            Err(e) => {
                tracing::info!("Dropping frame from '{}': {}", sender, e);
            }
        }
    }

    /// Decode and handle one frame.
    pub async fn dispatch(&self, sender: &Username, frame: &str) -> Result<(), DispatchError> {
        let event: InboundEvent = serde_json::from_str(frame)?;
        let kind = event.kind();
        let room = event.room().to_string();
        tracing::debug!("Received {} from '{}' for room '{}'", kind, sender, room);

        let result = match event {
            InboundEvent::NewOption { room, option } => self
                .add_option_usecase
                .execute(&room, sender, &option)
                .await
                .map(|_| ()),
            InboundEvent::LockIn { room, votes } => {
                let votes = votes.into_iter().filter_map(|(name, value)| {
                    // Always Some: out-of-range literals already fail to decode
                    value.as_f64().map(|value| (name, value))
                });
                self.lock_in_vote_usecase
                    .execute(&room, sender, votes)
                    .await
                    .map(|outcome| {
                        if let LockInOutcome::Closed(result) = outcome {
                            tracing::info!("Room '{}' closed automatically, result '{}'", room, result.id);
                        }
                    })
            }
            InboundEvent::CloseRoom { room } => self
                .close_room_usecase
                .execute(&room, sender)
                .await
                .map(|_| ()),
        };

        result.map_err(|source| DispatchError::Rejected { kind, room, source })
    }
}
