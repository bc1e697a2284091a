//! HTTP handlers for billing provider endpoints.

use crate::{
    AppState,
    api::models::providers::{ProviderCreate, ProviderResponse},
    db::{handlers::Providers, models::providers::ProviderCreateDBRequest},
    errors::{Error, Result},
};
use axum::{extract::State, http::StatusCode, response::Json};

// POST /providers - Register a billing provider
#[tracing::instrument(skip_all)]
pub async fn create_provider(
    State(state): State<AppState>,
    Json(data): Json<ProviderCreate>,
) -> Result<(StatusCode, Json<ProviderResponse>)> {
    data.validate().map_err(|errors| Error::Validation { errors })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Providers::new(&mut conn);

    let provider = repo
        .create(&ProviderCreateDBRequest {
            name: data.name,
            category: data.category,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProviderResponse::from(provider))))
}

// GET /providers - List all providers, newest first
#[tracing::instrument(skip_all)]
pub async fn list_providers(State(state): State<AppState>) -> Result<Json<Vec<ProviderResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Providers::new(&mut conn);

    let providers = repo.list().await?;
    Ok(Json(providers.into_iter().map(ProviderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_list_providers(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/providers")
            .json(&json!({"name": "City Power", "category": "electricity"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        app.post("/providers")
            .json(&json!({"name": "AquaNet", "category": "water"}))
            .await
            .assert_status(StatusCode::CREATED);

        let providers: Vec<ProviderResponse> = app.get("/providers").await.json();
        let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["AquaNet", "City Power"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_empty_category_fails_validation(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/providers")
            .json(&json!({"name": "City Power", "category": ""}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
