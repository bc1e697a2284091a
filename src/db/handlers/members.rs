//! Database repository for room members.

use crate::types::RoomId;
use crate::db::{
    errors::Result,
    models::members::{MemberCreateDBRequest, MemberDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Members<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Members<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(room_id = request.room_id, name = %request.name), err)]
    pub async fn create(&mut self, request: &MemberCreateDBRequest) -> Result<MemberDBResponse> {
        let member = sqlx::query_as::<_, MemberDBResponse>(
            "INSERT INTO members (room_id, name) VALUES ($1, $2) RETURNING id, room_id, name",
        )
        .bind(request.room_id)
        .bind(&request.name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(member)
    }

    /// Members in insertion order. The equal-split rule hands leftover cents
    /// to the earliest members, so ordering here is load-bearing.
    #[instrument(skip(self), err)]
    pub async fn list_for_room(&mut self, room_id: RoomId) -> Result<Vec<MemberDBResponse>> {
        let members = sqlx::query_as::<_, MemberDBResponse>(
            "SELECT id, room_id, name FROM members WHERE room_id = $1 ORDER BY id ASC",
        )
        .bind(room_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(members)
    }
}
