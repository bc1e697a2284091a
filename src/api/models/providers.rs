//! API request/response models for billing providers.

use crate::db::models::providers::ProviderDBResponse;
use crate::errors::FieldError;
use crate::types::ProviderId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload for creating a provider.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProviderCreate {
    /// Provider name, e.g. the utility company
    pub name: String,
    /// Billing category, e.g. "electricity", "water", "internet"
    pub category: String,
}

impl ProviderCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len < 1 || name_len > 120 {
            errors.push(FieldError::new("name", "must be between 1 and 120 characters"));
        }

        let category_len = self.category.chars().count();
        if category_len < 1 || category_len > 50 {
            errors.push(FieldError::new("category", "must be between 1 and 50 characters"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A provider as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderResponse {
    pub id: ProviderId,
    pub name: String,
    pub category: String,
}

impl From<ProviderDBResponse> for ProviderResponse {
    fn from(provider: ProviderDBResponse) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            category: provider.category,
        }
    }
}
