//! Database models for room members.

use crate::types::{MemberId, RoomId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A member row as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberDBResponse {
    pub id: MemberId,
    pub room_id: RoomId,
    pub name: String,
}

/// Request to insert a new member into a room.
#[derive(Debug, Clone)]
pub struct MemberCreateDBRequest {
    pub room_id: RoomId,
    pub name: String,
}
