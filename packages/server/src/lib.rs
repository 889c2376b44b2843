//! QuikVote voting room server library.
//!
//! Participants join a room by its shareable code, propose options, lock in
//! their scores over a WebSocket, and receive a ranked result the moment
//! every participant has voted or the owner closes the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
