//! WebSocket frame DTOs for the voting application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Frames a client may send over the socket.
///
/// Anything that does not match one of these shapes fails to decode and is
/// dropped by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Propose a new option
    #[serde(alias = "add_option")]
    NewOption { room: String, option: String },
    /// Submit the sender's final scores
    #[serde(alias = "lock_in_vote")]
    LockIn {
        room: String,
        votes: HashMap<String, serde_json::Number>,
    },
    /// Owner closes the room
    CloseRoom { room: String },
}

impl InboundEvent {
    /// Room the event targets
    pub fn room(&self) -> &str {
        match self {
            Self::NewOption { room, .. } | Self::LockIn { room, .. } | Self::CloseRoom { room } => {
                room
            }
        }
    }

    /// Wire name of the event, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewOption { .. } => "new_option",
            Self::LockIn { .. } => "lock_in",
            Self::CloseRoom { .. } => "close_room",
        }
    }
}

/// Frames broadcast to the participants of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundEvent {
    /// Full option list after a successful add
    Options { options: Vec<String> },
    /// The room closed; its result can be fetched by id
    ResultsAvailable { id: String },
}
