//! HTTP handlers for room endpoints.

use crate::{
    AppState,
    api::models::rooms::{RoomCreate, RoomResponse},
    db::{
        handlers::{Repository, Rooms},
        models::rooms::RoomCreateDBRequest,
    },
    errors::{Error, Result},
    types::RoomId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// Create a new room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    summary = "Create a room",
    request_body = RoomCreate,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 409, description = "Room name already exists"),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_room(
    State(state): State<AppState>,
    Json(data): Json<RoomCreate>,
) -> Result<(StatusCode, Json<RoomResponse>)> {
    data.validate().map_err(|errors| Error::Validation { errors })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut conn);

    // Fast-path duplicate check. Two racing creates can both pass it; the
    // unique index on rooms.name decides, and the insert error maps to the
    // same 409 below.
    if repo.find_by_name(&data.name).await?.is_some() {
        return Err(Error::Conflict {
            message: "Room name already exists".to_string(),
        });
    }

    let room = repo
        .create(&RoomCreateDBRequest {
            name: data.name,
            currency: data.currency,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation_on("rooms") {
                Error::Conflict {
                    message: "Room name already exists".to_string(),
                }
            } else {
                Error::Database(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

/// List all rooms
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    summary = "List rooms",
    description = "All rooms, most recently created first",
    responses(
        (status = 200, description = "List of rooms", body = Vec<RoomResponse>),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut conn);

    let rooms = repo.list().await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Get a single room by id
#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    tag = "rooms",
    summary = "Get a room",
    params(
        ("room_id" = i64, Path, description = "Room ID"),
    ),
    responses(
        (status = 200, description = "Room details", body = RoomResponse),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> Result<Json<RoomResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut conn);

    let room = repo.get_by_id(room_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Room".to_string(),
        id: room_id.to_string(),
    })?;

    Ok(Json(RoomResponse::from(room)))
}
