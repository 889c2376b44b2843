//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// RoomId invalid format error (not a valid UUID format)
    #[error("RoomId must be a valid UUID format (got: {0})")]
    RoomIdInvalidFormat(String),

    /// RoomCode invalid format error
    #[error("RoomCode must be {length} characters from the room code alphabet (got: {actual})")]
    RoomCodeInvalidFormat { length: usize, actual: String },

    /// OptionName validation error
    #[error("Option cannot be empty")]
    OptionNameEmpty,

    /// OptionName too long error
    #[error("Option cannot exceed {max} characters (got {actual})")]
    OptionNameTooLong { max: usize, actual: usize },

    /// Score is not a finite number
    #[error("Score must be a finite number (got: {0})")]
    ScoreNotFinite(String),

    /// ResultId invalid format error
    #[error("ResultId must be a valid UUID format (got: {0})")]
    ResultIdInvalidFormat(String),

    /// SessionToken invalid format error
    #[error("Session token must be a valid UUID format")]
    SessionTokenInvalidFormat(String),
}

/// Errors raised by the room state machine.
///
/// Every variant is a state conflict: the requested mutation is not legal
/// for the room's current state and nothing was changed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The room is closed; no further mutation is allowed
    #[error("Room is closed")]
    RoomClosed,

    /// The option is already part of the room
    #[error("Option '{0}' already exists")]
    OptionAlreadyExists(String),

    /// The participant has already locked in a vote
    #[error("Participant '{0}' has already locked in")]
    AlreadyLockedIn(String),

    /// The user is not a participant of the room
    #[error("User '{0}' is not a participant of the room")]
    NotParticipant(String),

    /// The user is not the owner of the room
    #[error("User '{0}' is not the owner of the room")]
    NotOwner(String),
}

/// Errors reported by the room/result store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No room with the given id
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    /// Another open room already uses this code
    #[error("Room code already in use: {0}")]
    DuplicateCode(String),

    /// Another session already holds this username
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// The store itself failed
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
