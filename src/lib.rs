//! FairShare: bill splitting for shared households.
//!
//! The crate exposes a REST API over PostgreSQL for rooms, members, bills and
//! cent-exact shares, plus a Postgres-backed task queue for background work.
//! Two binaries share this library: `fairshare` serves HTTP and enqueues
//! tasks, `fairshare-worker` consumes them.
//!
//! The flow for a request is handler -> repository -> PostgreSQL. Handlers in
//! [`api::handlers`] validate input and map domain errors to HTTP; the
//! repositories in [`db::handlers`] own the SQL.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod jobs;
mod openapi;
pub mod split;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use crate::config::{Config, CorsOrigin};
use crate::jobs::OcrDispatcher;
use axum::{
    Json, Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use bon::Builder;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument, warn};

/// Shared state handed to every request handler.
///
/// `ocr_dispatcher` is `None` when the queue is disabled or failed to
/// initialize at startup; task dispatch then degrades instead of erroring.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub ocr_dispatcher: Option<Arc<OcrDispatcher>>,
}

/// Get the fairshare database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let wildcard = config
        .cors
        .allowed_origins
        .iter()
        .any(|origin| matches!(origin, CorsOrigin::Wildcard));

    if wildcard {
        if config.cors.allow_credentials {
            anyhow::bail!("CORS wildcard origin cannot be combined with allow_credentials");
        }
        // A literal `*` inside an origin list is rejected by the layer;
        // wildcard means any origin, method and header.
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        if let CorsOrigin::Url(url) = origin {
            origins.push(url.as_str().parse::<HeaderValue>()?);
        }
    }

    let cors = CorsLayer::new().allow_origin(origins);
    let cors = if config.cors.allow_credentials {
        // Credentialed requests cannot use `*` for methods or headers
        // either; mirror whatever the preflight asks for.
        cors.allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true)
    } else {
        cors.allow_methods(Any).allow_headers(Any)
    };

    Ok(cors)
}

/// Build the application router with all endpoints and middleware.
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    use crate::api::handlers::{bills, members, providers, rooms, tasks, users};

    let router = Router::new()
        .route("/health", get(health))
        .route("/rooms", post(rooms::create_room).get(rooms::list_rooms))
        .route("/rooms/{room_id}", get(rooms::get_room))
        .route(
            "/rooms/{room_id}/members",
            post(members::create_member).get(members::list_members),
        )
        .route(
            "/rooms/{room_id}/bills",
            post(bills::create_bill).get(bills::list_bills),
        )
        .route("/rooms/{room_id}/bills/{bill_id}", delete(bills::delete_bill))
        .route("/rooms/{room_id}/summary", get(bills::get_summary))
        .route("/users", post(users::create_user).get(users::list_users))
        .route("/users/{user_id}", get(users::get_user))
        .route(
            "/providers",
            post(providers::create_provider).get(providers::list_providers),
        )
        .route("/tasks/ocr-test", post(tasks::enqueue_ocr_test))
        .route(
            "/api-docs/openapi.json",
            get(|| async {
                use utoipa::OpenApi;
                Json(openapi::ApiDoc::openapi())
            }),
        )
        .with_state(state.clone());

    let cors_layer = create_cors_layer(&state.config)?;

    Ok(router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    ))
}

/// A fully initialized API process: pool connected, migrations run, router
/// built, queue attached when available.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = connect_pool(&config).await?;

        migrator().run(&pool).await?;

        // A broken queue is a degraded start, not a failed one; dispatch
        // endpoints report queued: false until the worker side is back.
        let ocr_dispatcher = if config.queue.enabled {
            match jobs::build_ocr_dispatcher(pool.clone()).await {
                Ok(dispatcher) => Some(Arc::new(dispatcher)),
                Err(e) => {
                    warn!("Task queue unavailable, starting without it: {e:#}");
                    None
                }
            }
        } else {
            None
        };

        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .maybe_ocr_dispatcher(ocr_dispatcher)
            .build();

        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("FairShare API listening on http://{bind_addr}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

/// Connect a pool using the configured tuning parameters.
pub async fn connect_pool(config: &Config) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.pool.max_connections)
        .min_connections(config.pool.min_connections)
        .acquire_timeout(Duration::from_secs(config.pool.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}
