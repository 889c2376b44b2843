//! HTTP API request/response DTOs for the voting application.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request of `POST /api/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

/// Caller's username, returned by `POST /api/register` and `GET /api/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
}

/// Response of `POST /api/room`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub id: String,
    pub code: String,
}

/// Response of `POST /api/room/{code}/join`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub id: String,
}

/// Room view for the detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub code: String,
    pub owner: String,
    pub is_owner: bool,
    pub state: String,
    pub options: Vec<String>,
    pub participants: Vec<ParticipantDto>,
    pub created_at: String, // ISO 8601
}

/// Participant entry of a room view. Scores stay private until the tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub username: String,
    pub locked_in: bool,
}

/// A persisted tally
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDto {
    pub id: String,
    pub room_id: String,
    pub owner: String,
    /// Option names, best first
    pub results: Vec<String>,
    /// Aggregate score of each entry of `results`
    pub totals: Vec<u32>,
    pub created_at: String, // ISO 8601
}

/// Request of `POST /api/room/{id}/options`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOptionRequest {
    pub option: String,
}

/// Response of `POST /api/room/{id}/options`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub options: Vec<String>,
}

/// Request of `POST /api/room/{id}/lockin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInRequest {
    pub votes: HashMap<String, serde_json::Number>,
}

/// Response of `POST /api/room/{id}/lockin` and `POST /api/room/{id}/close`
///
/// `results_id` is only set when the request closed the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsIdResponse {
    pub results_id: Option<String>,
}
