//! Database repository for billing providers.

use crate::db::{
    errors::Result,
    models::providers::{ProviderCreateDBRequest, ProviderDBResponse},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Providers<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Providers<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(name = %request.name, category = %request.category), err)]
    pub async fn create(&mut self, request: &ProviderCreateDBRequest) -> Result<ProviderDBResponse> {
        let provider = sqlx::query_as::<_, ProviderDBResponse>(
            "INSERT INTO providers (name, category) VALUES ($1, $2) RETURNING id, name, category",
        )
        .bind(&request.name)
        .bind(&request.category)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(provider)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<ProviderDBResponse>> {
        let providers = sqlx::query_as::<_, ProviderDBResponse>(
            "SELECT id, name, category FROM providers ORDER BY id DESC",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(providers)
    }
}
