//! UseCase テスト用の共通セットアップ
//!
//! インメモリのストアと接続レジストリを組み立て、alice がオーナーの
//! Open なルームを 1 つ用意する。

use std::sync::Arc;

use quikvote_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionRegistry, OptionName, Room, RoomCode, RoomId, RoomIdFactory, RoomRepository,
        Score, ScoreSheet, Timestamp, Username,
    },
    infrastructure::{
        broadcaster::RegistryBroadcaster,
        connection_registry::WebSocketConnectionRegistry,
        repository::{InMemoryResultRepository, InMemoryRoomRepository},
    },
};

use super::RoomFinalizer;

pub fn user(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}

pub fn option(name: &str) -> OptionName {
    OptionName::new(name.to_string()).unwrap()
}

pub fn sheet(entries: &[(&str, u8)]) -> ScoreSheet {
    entries
        .iter()
        .map(|(name, score)| (option(name), Score::new(*score)))
        .collect()
}

/// 接続 1 つ分の受信側
pub struct Listener {
    rx: mpsc::UnboundedReceiver<String>,
}

impl Listener {
    /// これまでに届いたフレームを全て取り出す
    pub fn frames(&mut self) -> Vec<serde_json::Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    /// 次のフレームが届くまで待つ
    pub async fn next_frame(&mut self) -> serde_json::Value {
        let frame = tokio::time::timeout(std::time::Duration::from_secs(1), self.rx.recv())
            .await
            .unwrap()
            .unwrap();
        serde_json::from_str(&frame).unwrap()
    }
}

pub struct Fixture {
    pub rooms: Arc<InMemoryRoomRepository>,
    pub results: Arc<InMemoryResultRepository>,
    pub registry: Arc<WebSocketConnectionRegistry>,
    pub broadcaster: Arc<RegistryBroadcaster>,
    pub clock: Arc<FixedClock>,
    pub room_id: RoomId,
}

impl Fixture {
    pub async fn new() -> Self {
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let results = Arc::new(InMemoryResultRepository::new());
        let registry = Arc::new(WebSocketConnectionRegistry::new());
        let broadcaster = Arc::new(RegistryBroadcaster::new(registry.clone()));
        let clock = Arc::new(FixedClock::new(1_700_000_000_000));
        let room = Room::new(
            RoomIdFactory::generate(),
            RoomCode::new("K7QM".to_string()).unwrap(),
            user("alice"),
            Timestamp::new(1_700_000_000_000),
        );
        let room_id = rooms.create(room).await.unwrap().id;
        Self {
            rooms,
            results,
            registry,
            broadcaster,
            clock,
            room_id,
        }
    }

    pub fn finalizer(&self) -> Arc<RoomFinalizer> {
        Arc::new(RoomFinalizer::new(
            self.rooms.clone(),
            self.results.clone(),
            self.broadcaster.clone(),
            self.clock.clone(),
        ))
    }

    pub async fn join(&self, name: &str) {
        self.rooms
            .add_participant(&self.room_id, &user(name))
            .await
            .unwrap()
            .into_result()
            .unwrap();
    }

    pub async fn add_option(&self, name: &str) {
        self.rooms
            .add_option(&self.room_id, &option(name))
            .await
            .unwrap()
            .into_result()
            .unwrap();
    }

    pub async fn vote(&self, name: &str, entries: &[(&str, u8)]) {
        self.rooms
            .submit_votes(&self.room_id, &user(name), sheet(entries))
            .await
            .unwrap()
            .into_result()
            .unwrap();
    }

    pub async fn connect(&self, name: &str) -> Listener {
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.register(user(name), tx).await;
        Listener { rx }
    }

    pub async fn room(&self) -> Room {
        self.rooms.find_by_id(&self.room_id).await.unwrap().unwrap()
    }
}
