//! Shared helpers for integration tests.
//!
//! Tests run against a real database via `#[sqlx::test]`, which hands each
//! test its own migrated pool. `create_test_app` builds the app without a
//! task queue, so dispatch endpoints exercise their degraded path;
//! `create_test_app_with_queue` attaches a real dispatcher for the happy
//! path.

use crate::{AppState, config::Config, types::RoomId};
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_app(pool: PgPool) -> TestServer {
    let state = AppState::builder().db(pool).config(Config::default()).build();
    let router = crate::build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub async fn create_test_app_with_queue(pool: PgPool) -> TestServer {
    let dispatcher = crate::jobs::build_ocr_dispatcher(pool.clone())
        .await
        .expect("Failed to build dispatcher");
    let state = AppState::builder()
        .db(pool)
        .config(Config::default())
        .ocr_dispatcher(Arc::new(dispatcher))
        .build();
    let router = crate::build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

pub async fn create_test_room(app: &TestServer, name: &str) -> RoomId {
    let response = app.post("/rooms").json(&serde_json::json!({ "name": name })).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let room: crate::api::models::rooms::RoomResponse = response.json();
    room.id
}
