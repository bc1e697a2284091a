//! API request/response models for rooms.

use crate::db::models::rooms::RoomDBResponse;
use crate::errors::FieldError;
use crate::types::RoomId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_currency() -> String {
    "EUR".to_string()
}

/// Payload for creating a room.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoomCreate {
    /// Room name, 1-80 characters, unique across all rooms
    pub name: String,
    /// ISO-ish currency code, 3-8 characters
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl RoomCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len < 1 || name_len > 80 {
            errors.push(FieldError::new("name", "must be between 1 and 80 characters"));
        }

        let currency_len = self.currency.chars().count();
        if currency_len < 3 || currency_len > 8 {
            errors.push(FieldError::new("currency", "must be between 3 and 8 characters"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A room as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub currency: String,
}

impl From<RoomDBResponse> for RoomResponse {
    fn from(room: RoomDBResponse) -> Self {
        Self {
            id: room.id,
            name: room.name,
            currency: room.currency,
        }
    }
}
