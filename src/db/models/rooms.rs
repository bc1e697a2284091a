//! Database models for rooms.

use crate::types::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A room row as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomDBResponse {
    pub id: RoomId,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Request to insert a new room.
#[derive(Debug, Clone)]
pub struct RoomCreateDBRequest {
    pub name: String,
    pub currency: String,
}
