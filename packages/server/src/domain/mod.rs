//! Domain layer for the voting application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod broadcaster;
pub mod connection_registry;
pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod tally;
pub mod value_object;

pub use broadcaster::{RoomBroadcaster, RoomEvent};
pub use connection_registry::{BroadcastReport, ConnectionRegistry, PusherChannel};
pub use entity::{Participant, Room, RoomState, ScoreSheet, VoteResult};
pub use error::{RepositoryError, RoomError, ValueObjectError};
pub use factory::{
    AnonymousUsernameFactory, ConnectionIdFactory, ResultIdFactory, RoomCodeFactory, RoomIdFactory,
    SessionTokenFactory,
};
pub use repository::{ResultRepository, RoomRepository, SessionRepository, WriteOutcome};
pub use tally::{RankedOption, tally};
pub use value_object::{
    ConnectionId, OptionName, ResultId, RoomCode, RoomId, Score, SessionToken, Timestamp,
    Username,
};
