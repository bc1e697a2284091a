//! API request/response models for users.

use crate::db::models::users::UserDBResponse;
use crate::errors::FieldError;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload for creating a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserCreate {
    /// Email address, unique across all users
    pub email: String,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

impl UserCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let email_len = self.email.chars().count();
        if email_len < 3 || email_len > 255 || !self.email.contains('@') {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }

        if let Some(name) = &self.name {
            if name.chars().count() > 120 {
                errors.push(FieldError::new("name", "must be at most 120 characters"));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A user as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
}

impl From<UserDBResponse> for UserResponse {
    fn from(user: UserDBResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_at_sign_is_rejected() {
        let create = UserCreate {
            email: "not-an-email".to_string(),
            name: None,
        };
        let errors = create.validate().unwrap_err();
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn plain_email_is_accepted() {
        let create = UserCreate {
            email: "anna@example.com".to_string(),
            name: Some("Anna".to_string()),
        };
        assert!(create.validate().is_ok());
    }
}
