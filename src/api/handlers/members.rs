//! HTTP handlers for room membership endpoints.

use crate::{
    AppState,
    api::models::members::{MemberCreate, MemberResponse},
    db::{
        handlers::{Members, Repository, Rooms},
        models::members::MemberCreateDBRequest,
    },
    errors::{Error, Result},
    types::RoomId,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sqlx::PgConnection;

/// 404 before touching the sub-resource when the room itself is missing.
pub(crate) async fn ensure_room_exists(conn: &mut PgConnection, room_id: RoomId) -> Result<()> {
    let mut rooms = Rooms::new(conn);
    if rooms.get_by_id(room_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Room".to_string(),
            id: room_id.to_string(),
        });
    }
    Ok(())
}

// POST /rooms/{room_id}/members - Add a member to a room
#[tracing::instrument(skip_all)]
pub async fn create_member(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    Json(data): Json<MemberCreate>,
) -> Result<(StatusCode, Json<MemberResponse>)> {
    data.validate().map_err(|errors| Error::Validation { errors })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let mut repo = Members::new(&mut conn);
    let member = repo
        .create(&MemberCreateDBRequest {
            room_id,
            name: data.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

// GET /rooms/{room_id}/members - List a room's members in joining order
#[tracing::instrument(skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> Result<Json<Vec<MemberResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let mut repo = Members::new(&mut conn);
    let members = repo.list_for_room(room_id).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_members_list_in_joining_order(pool: PgPool) {
        let app = create_test_app(pool).await;
        let room_id = create_test_room(&app, "Flat 12B").await;

        for name in ["Ana", "Ben", "Cleo"] {
            app.post(&format!("/rooms/{room_id}/members"))
                .json(&json!({"name": name}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let members: Vec<MemberResponse> = app.get(&format!("/rooms/{room_id}/members")).await.json();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Ben", "Cleo"]);
        assert!(members.iter().all(|m| m.room_id == room_id));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_member_endpoints_404_on_missing_room(pool: PgPool) {
        let app = create_test_app(pool).await;

        app.post("/rooms/999/members")
            .json(&json!({"name": "Ana"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.get("/rooms/999/members").await.assert_status(StatusCode::NOT_FOUND);
    }
}
