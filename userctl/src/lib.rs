//! # userctl: User management service
//!
//! `userctl` stores users in PostgreSQL and exposes create/read/update/delete operations over a
//! small REST API.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for the HTTP layer and
//! [SQLx](https://github.com/launchbadge/sqlx) for persistence.
//!
//! A request to `/api/v1/users/*` reaches a handler in [`api::handlers`], which builds a per-request
//! [`context::ExecutionContext`] and calls the [`db::handlers::Users`] repository. The repository
//! issues one statement per call and translates the row into a [`db::models::users::User`]. Every
//! response, including errors and unmatched paths, passes through the CORS stage in
//! [`middleware::cors`] before leaving the router.
//!
//! ### Cancellation
//!
//! The application owns a root [`CancellationToken`]. Each request context is a child of it with
//! the configured statement timeout as its deadline. When the server begins shutting down the root
//! token is cancelled, so in-flight repository calls stop waiting on the database and report
//! [`db::errors::DbError::Cancelled`].
//!
//! ## Configuration
//!
//! See [`config`] for the YAML file layout and environment variable overrides.
//!
//! ## Testing
//!
//! Database tests use `#[sqlx::test]`, which provisions a fresh database per test and applies the
//! migrations in `migrations/`. Helpers for seeding and driving the HTTP API live in the
//! `test_utils` module, available to other crates with the `test-utils` feature.

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod openapi;
pub mod telemetry;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;

use axum::{
    Json, Router,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use context::ExecutionContext;
use middleware::{CorsHeaders, cors_headers_middleware};
use openapi::UsersApiDoc;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::UserId;

/// Application state shared across all request handlers.
///
/// ```ignore
/// let state = AppState::builder()
///     .db(pool)
///     .config(config)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Root token; cancelled once the server starts shutting down
    #[builder(default)]
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Context for one request: follows the shutdown token, bounded by the statement timeout.
    pub fn request_context(&self) -> ExecutionContext {
        ExecutionContext::new(self.shutdown.child_token()).with_timeout(self.config.database.statement_timeout)
    }
}

/// Get the userctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Connect the main pool with the configured settings and apply the schema.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let settings = &config.database.pool;
    let non_zero = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(non_zero(settings.idle_timeout_secs))
        .max_lifetime(non_zero(settings.max_lifetime_secs))
        .connect(&config.database.url)
        .await?;

    migrator().run(&pool).await?;
    Ok(pool)
}

/// Build the application router.
///
/// - `/api/v1/users`, `/api/v1/users/{user_id}`: user CRUD
/// - `/api/v1/openapi.json`, `/docs`: API documentation
/// - `/healthz`: liveness
///
/// Unmatched paths hit an explicit 404 fallback. The CORS stage wraps everything, so it decorates
/// the fallback too. Tracing is the outermost layer.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors = CorsHeaders::from_config(&state.config.cors)?;

    let api_routes = Router::new()
        .route("/users", post(api::handlers::users::create_user))
        .route(
            "/users/{user_id}",
            get(api::handlers::users::get_user)
                .put(api::handlers::users::update_user)
                .delete(api::handlers::users::delete_user),
        )
        .route("/openapi.json", get(|| async { Json(UsersApiDoc::openapi()) }));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .nest("/api/v1", api_routes)
        .with_state(state)
        .merge(Scalar::with_url("/docs", UsersApiDoc::openapi()))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(from_fn_with_state(cors, cors_headers_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects the pool, applies the schema and builds the router
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and handles requests until shutdown
/// 3. **Shutdown**: cancels in-flight database work, closes the pool and flushes telemetry
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
    shutdown: CancellationToken,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting userctl with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;
        Self::from_parts(config, pool)
    }

    /// Create an application around an existing pool. The schema is applied if missing.
    pub async fn new_with_pool(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        migrator().run(&pool).await?;
        Self::from_parts(config, pool)
    }

    fn from_parts(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let app_state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .shutdown(shutdown.clone())
            .build();

        let router = build_router(app_state)?;

        Ok(Self {
            router,
            config,
            pool,
            shutdown,
        })
    }

    /// Convert application into a test server (for tests)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "userctl listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        let token = self.shutdown.clone();
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown.await;
                // Abort database work still waiting on the store
                token.cancel();
            })
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{AppState, build_router};
    use crate::test_utils::create_test_config;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use sqlx::postgres::PgPoolOptions;

    /// A router over a pool that never connects. Requests that reach the store fail; requests
    /// answered before any statement is issued succeed.
    fn offline_server(state_hook: impl FnOnce(&AppState)) -> TestServer {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://userctl@127.0.0.1:1/unreachable")
            .unwrap();
        let state = AppState::builder().db(pool).config(create_test_config()).build();
        state_hook(&state);
        TestServer::new(build_router(state).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let server = offline_server(|_| {});

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        response.assert_text("OK");
        assert_eq!(response.header("access-control-allow-origin"), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unmatched_path_is_decorated_404() {
        let server = offline_server(|_| {});

        let response = server.get("/api/v1/nothing-here").await;

        response.assert_status_not_found();
        assert_eq!(response.header("access-control-allow-origin"), "http://localhost:3000");
        assert_eq!(response.header("access-control-allow-headers"), "Content-Type, Authorization");
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }

    #[tokio::test]
    async fn test_openapi_json_and_docs() {
        let server = offline_server(|_| {});

        let doc = server.get("/api/v1/openapi.json").await;
        doc.assert_status_ok();
        let content = doc.text();
        assert!(content.contains("\"openapi\""));
        assert!(content.contains("/users/{user_id}"));

        server.get("/docs").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_shutdown_aborts_requests_before_store() {
        let server = offline_server(|state| state.shutdown.cancel());

        let response = server.get("/api/v1/users/1").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        response.assert_text("Service is shutting down");
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }

    #[tokio::test]
    async fn test_non_numeric_id_never_reaches_store() {
        let server = offline_server(|_| {});

        server.get("/api/v1/users/abc").await.assert_status_not_found();
        server
            .put("/api/v1/users/abc")
            .json(&json!({ "name": "renamed" }))
            .await
            .assert_status_not_found();
        server.delete("/api/v1/users/abc").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_store_unreachable_is_internal_error() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://userctl@127.0.0.1:1/unreachable")
            .unwrap();
        let state = AppState::builder().db(pool).config(create_test_config()).build();
        let server = TestServer::new(build_router(state).unwrap()).unwrap();

        let response = server.get("/api/v1/users/1").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_text("Database error occurred");
    }
}
