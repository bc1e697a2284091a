//! Database repository for rooms.

use crate::types::RoomId;
use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::rooms::{RoomCreateDBRequest, RoomDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Rooms<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Rooms<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a room by its exact (case-sensitive) name.
    ///
    /// Used as the fast-path duplicate check on creation; the unique index on
    /// `rooms.name` remains the authoritative guarantee.
    #[instrument(skip(self), err)]
    pub async fn find_by_name(&mut self, name: &str) -> Result<Option<RoomDBResponse>> {
        let room = sqlx::query_as::<_, RoomDBResponse>(
            "SELECT id, name, currency, created_at FROM rooms WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(room)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Rooms<'c> {
    type CreateRequest = RoomCreateDBRequest;
    type Response = RoomDBResponse;
    type Id = RoomId;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let room = sqlx::query_as::<_, RoomDBResponse>(
            "INSERT INTO rooms (name, currency) VALUES ($1, $2) RETURNING id, name, currency, created_at",
        )
        .bind(&request.name)
        .bind(&request.currency)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(room)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let room = sqlx::query_as::<_, RoomDBResponse>(
            "SELECT id, name, currency, created_at FROM rooms WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(room)
    }

    /// Most-recently-created first. No pagination: unbounded result size is an
    /// accepted limitation at this scope.
    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Self::Response>> {
        let rooms = sqlx::query_as::<_, RoomDBResponse>(
            "SELECT id, name, currency, created_at FROM rooms ORDER BY id DESC",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rooms)
    }
}
