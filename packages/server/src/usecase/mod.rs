//! UseCase layer.
//!
//! Each use case orchestrates domain models through the traits the domain
//! layer defines, and never depends on a concrete infrastructure type.

pub mod add_option;
pub mod authenticate;
pub mod close_room;
pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod finalize_room;
pub mod get_result;
pub mod get_room;
pub mod join_room;
pub mod lock_in_vote;

#[cfg(test)]
pub(crate) mod test_support;

pub use add_option::AddOptionUseCase;
pub use authenticate::{AuthenticateUseCase, Session};
pub use close_room::CloseRoomUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::UseCaseError;
pub use finalize_room::RoomFinalizer;
pub use get_result::{GetHistoryUseCase, GetResultUseCase};
pub use get_room::GetRoomUseCase;
pub use join_room::JoinRoomUseCase;
pub use lock_in_vote::{LockInOutcome, LockInVoteUseCase};
