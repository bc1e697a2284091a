//! API request/response models for room members.

use crate::db::models::members::MemberDBResponse;
use crate::errors::FieldError;
use crate::types::{MemberId, RoomId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload for adding a member to a room.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MemberCreate {
    pub name: String,
}

impl MemberCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let name_len = self.name.chars().count();
        if name_len < 1 || name_len > 120 {
            return Err(vec![FieldError::new("name", "must be between 1 and 120 characters")]);
        }
        Ok(())
    }
}

/// A member as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: MemberId,
    pub room_id: RoomId,
    pub name: String,
}

impl From<MemberDBResponse> for MemberResponse {
    fn from(member: MemberDBResponse) -> Self {
        Self {
            id: member.id,
            room_id: member.room_id,
            name: member.name,
        }
    }
}
