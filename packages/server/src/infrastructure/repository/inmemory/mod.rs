//! InMemory implementations of the room, result and session stores.

pub mod result;
pub mod room;
pub mod session;

pub use result::InMemoryResultRepository;
pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
