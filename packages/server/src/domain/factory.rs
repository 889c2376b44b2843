//! Domain factories for creating identifiers and codes.

use rand::Rng;

use super::{
    ConnectionId, ResultId, RoomCode, RoomId, SessionToken, Username,
    value_object::{ROOM_CODE_ALPHABET, ROOM_CODE_LENGTH},
};

/// Factory for generating RoomId instances.
///
/// This factory encapsulates the logic for generating new room identifiers,
/// separating the generation concern from the validation logic in RoomId.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new RoomId with a random UUID v4.
    pub fn generate() -> RoomId {
        RoomId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating shareable room codes.
pub struct RoomCodeFactory;

impl RoomCodeFactory {
    /// Generate a random code of `ROOM_CODE_LENGTH` characters drawn
    /// uniformly from `ROOM_CODE_ALPHABET`.
    ///
    /// Uniqueness is not checked here; the room store rejects a code that
    /// collides with another open room.
    pub fn generate() -> RoomCode {
        let mut rng = rand::rng();
        let code: String = (0..ROOM_CODE_LENGTH)
            .map(|_| char::from(ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())]))
            .collect();
        RoomCode(code)
    }
}

/// Factory for generating ResultId instances.
pub struct ResultIdFactory;

impl ResultIdFactory {
    /// Generate a new ResultId with a random UUID v4.
    pub fn generate() -> ResultId {
        ResultId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for identities of callers who never signed in.
pub struct AnonymousUsernameFactory;

impl AnonymousUsernameFactory {
    /// Generate a new anonymous Username with a random UUID v4.
    pub fn generate() -> Username {
        Username::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating SessionToken instances.
pub struct SessionTokenFactory;

impl SessionTokenFactory {
    /// Generate a new SessionToken with a random UUID v4.
    pub fn generate() -> SessionToken {
        SessionToken::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId with a random UUID v4.
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(uuid::Uuid::new_v4())
    }
}
