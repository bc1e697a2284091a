//! Database models for billing providers.

use crate::types::ProviderId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A provider row as stored in the database. No uniqueness is declared on
/// providers; duplicates are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProviderDBResponse {
    pub id: ProviderId,
    pub name: String,
    pub category: String,
}

/// Request to insert a new provider.
#[derive(Debug, Clone)]
pub struct ProviderCreateDBRequest {
    pub name: String,
    pub category: String,
}
