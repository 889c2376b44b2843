//! Shared application state.

use std::sync::Arc;

use quikvote_shared::time::Clock;

use crate::{
    infrastructure::{
        broadcaster::RegistryBroadcaster,
        connection_registry::WebSocketConnectionRegistry,
        repository::{
            InMemoryResultRepository, InMemoryRoomRepository, InMemorySessionRepository,
        },
    },
    usecase::{
        AddOptionUseCase, AuthenticateUseCase, CloseRoomUseCase, ConnectParticipantUseCase,
        CreateRoomUseCase, DisconnectParticipantUseCase, GetHistoryUseCase, GetResultUseCase,
        GetRoomUseCase, JoinRoomUseCase, LockInVoteUseCase, RoomFinalizer,
    },
};

use super::dispatcher::EventDispatcher;

/// Shared application state
pub struct AppState {
    /// AuthenticateUseCase（セッションの解決・発行のユースケース）
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// AddOptionUseCase（選択肢追加のユースケース）
    pub add_option_usecase: Arc<AddOptionUseCase>,
    /// LockInVoteUseCase（投票確定のユースケース）
    pub lock_in_vote_usecase: Arc<LockInVoteUseCase>,
    /// CloseRoomUseCase（ルームクローズのユースケース）
    pub close_room_usecase: Arc<CloseRoomUseCase>,
    /// GetRoomUseCase（ルーム取得のユースケース）
    pub get_room_usecase: Arc<GetRoomUseCase>,
    /// GetResultUseCase（集計結果取得のユースケース）
    pub get_result_usecase: Arc<GetResultUseCase>,
    /// GetHistoryUseCase（投票履歴取得のユースケース）
    pub get_history_usecase: Arc<GetHistoryUseCase>,
    /// ConnectParticipantUseCase（接続登録のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（接続解除のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// EventDispatcher（WebSocket フレームの振り分け）
    pub dispatcher: Arc<EventDispatcher>,
}

impl AppState {
    /// Wire every use case against the in-memory stores.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        // 1. Repository / ConnectionRegistry
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let result_repository = Arc::new(InMemoryResultRepository::new());
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let registry = Arc::new(WebSocketConnectionRegistry::new());

        // 2. Broadcaster
        let broadcaster = Arc::new(RegistryBroadcaster::new(registry.clone()));

        // 3. UseCases
        let finalizer = Arc::new(RoomFinalizer::new(
            room_repository.clone(),
            result_repository.clone(),
            broadcaster.clone(),
            clock.clone(),
        ));
        let add_option_usecase = Arc::new(AddOptionUseCase::new(
            room_repository.clone(),
            broadcaster,
        ));
        let lock_in_vote_usecase = Arc::new(LockInVoteUseCase::new(
            room_repository.clone(),
            finalizer.clone(),
        ));
        let close_room_usecase = Arc::new(CloseRoomUseCase::new(
            room_repository.clone(),
            finalizer,
        ));

        // 4. WebSocket と HTTP は同じユースケースを共有する
        let dispatcher = EventDispatcher::new(
            add_option_usecase.clone(),
            lock_in_vote_usecase.clone(),
            close_room_usecase.clone(),
        );

        Self {
            authenticate_usecase: Arc::new(AuthenticateUseCase::new(session_repository)),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(room_repository.clone(), clock)),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(room_repository.clone())),
            add_option_usecase,
            lock_in_vote_usecase,
            close_room_usecase,
            get_room_usecase: Arc::new(GetRoomUseCase::new(room_repository)),
            get_result_usecase: Arc::new(GetResultUseCase::new(result_repository.clone())),
            get_history_usecase: Arc::new(GetHistoryUseCase::new(result_repository)),
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                registry.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(registry)),
            dispatcher: Arc::new(dispatcher),
        }
    }
}
