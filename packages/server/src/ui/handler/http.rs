//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{Room, Username},
    infrastructure::dto::{
        conversion::room_state_label,
        http::{
            AddOptionRequest, CreateRoomResponse, HealthResponse, JoinRoomResponse, LockInRequest,
            OptionsResponse, RegisterRequest, ResultDto, ResultsIdResponse, RoomDetailDto,
            UserResponse,
        },
    },
    ui::{auth::Identity, error::ApiError, state::AppState},
    usecase::LockInOutcome,
};
use quikvote_shared::time::timestamp_to_rfc3339;

fn room_detail(room: Room, viewer: &Username) -> RoomDetailDto {
    RoomDetailDto {
        id: room.id.to_string(),
        code: room.code.to_string(),
        is_owner: room.is_owner(viewer),
        owner: room.owner.into_string(),
        state: room_state_label(room.state).to_string(),
        options: room.options.into_iter().map(|o| o.into_string()).collect(),
        participants: room.participants.into_iter().map(Into::into).collect(),
        created_at: timestamp_to_rfc3339(room.created_at.value()),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Claim a username and start a session for it
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Identity, Json<UserResponse>), ApiError> {
    let session = state
        .authenticate_usecase
        .register(&request.username)
        .await?;
    let body = UserResponse {
        username: session.username.to_string(),
    };
    Ok((StatusCode::CREATED, session.into(), Json(body)))
}

/// The caller's username
pub async fn me(identity: Identity) -> (Identity, Json<UserResponse>) {
    let body = UserResponse {
        username: identity.username.to_string(),
    };
    (identity, Json(body))
}

/// Create a room owned by the caller
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<(StatusCode, Identity, Json<CreateRoomResponse>), ApiError> {
    let room = state
        .create_room_usecase
        .execute(identity.username.clone())
        .await?;
    let body = CreateRoomResponse {
        id: room.id.into_string(),
        code: room.code.into_string(),
    };
    Ok((StatusCode::CREATED, identity, Json(body)))
}

/// Join a room by its shareable code
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    identity: Identity,
) -> Result<(StatusCode, Identity, Json<JoinRoomResponse>), ApiError> {
    let room = state
        .join_room_usecase
        .execute(&code, identity.username.clone())
        .await?;
    let body = JoinRoomResponse {
        id: room.id.into_string(),
    };
    Ok((StatusCode::OK, identity, Json(body)))
}

/// Get an open room as seen by the caller
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    identity: Identity,
) -> Result<(StatusCode, Identity, Json<RoomDetailDto>), ApiError> {
    let room = state.get_room_usecase.execute(&room_id).await?;
    let body = room_detail(room, &identity.username);
    Ok((StatusCode::OK, identity, Json(body)))
}

/// Get a persisted result
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(result_id): Path<String>,
) -> Result<Json<ResultDto>, ApiError> {
    let result = state.get_result_usecase.execute(&result_id).await?;
    Ok(Json(result.into()))
}

/// Results of rooms the caller owned, newest first
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    identity: Identity,
) -> Result<(StatusCode, Identity, Json<Vec<ResultDto>>), ApiError> {
    let results = state
        .get_history_usecase
        .execute(&identity.username)
        .await?;
    let body = results.into_iter().map(Into::into).collect();
    Ok((StatusCode::OK, identity, Json(body)))
}

/// Add an option to a room the caller participates in
pub async fn add_option(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    identity: Identity,
    Json(request): Json<AddOptionRequest>,
) -> Result<(StatusCode, Identity, Json<OptionsResponse>), ApiError> {
    let room = state
        .add_option_usecase
        .execute(&room_id, &identity.username, &request.option)
        .await?;
    let body = OptionsResponse {
        options: room.options.into_iter().map(|o| o.into_string()).collect(),
    };
    Ok((StatusCode::CREATED, identity, Json(body)))
}

/// Lock in the caller's scores
pub async fn lock_in(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    identity: Identity,
    Json(request): Json<LockInRequest>,
) -> Result<(StatusCode, Identity, Json<ResultsIdResponse>), ApiError> {
    let votes = request
        .votes
        .into_iter()
        .filter_map(|(name, value)| value.as_f64().map(|value| (name, value)));
    let outcome = state
        .lock_in_vote_usecase
        .execute(&room_id, &identity.username, votes)
        .await?;
    let results_id = match outcome {
        LockInOutcome::Closed(result) => Some(result.id.into_string()),
        LockInOutcome::Recorded => None,
    };
    Ok((StatusCode::OK, identity, Json(ResultsIdResponse { results_id })))
}

/// Close a room the caller owns
pub async fn close_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    identity: Identity,
) -> Result<(StatusCode, Identity, Json<ResultsIdResponse>), ApiError> {
    let result = state
        .close_room_usecase
        .execute(&room_id, &identity.username)
        .await?;
    let body = ResultsIdResponse {
        results_id: Some(result.id.into_string()),
    };
    Ok((StatusCode::OK, identity, Json(body)))
}
