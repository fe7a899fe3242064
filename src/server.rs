//! # Server Module
//!
//! HTTP server setup and route configuration for the Conecta server.

use anyhow::{Context, Result};
use axum::routing::{delete, get, patch, post};
use axum::{Router, middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::auth::jwt::JwtService;
use crate::auth::middleware::AuthMiddleware;
use crate::config::Config;
use crate::database::{DatabaseConfig, DatabaseConnection};
use crate::routes;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub db: Arc<DatabaseConnection>,
}

/// Build the application router with per-group auth layering.
pub fn build_router(app_state: AppState) -> Router {
    let jwt_service = app_state.jwt_service.clone();

    // Admin endpoints: token validation first, then the role gate
    let admin_routes = Router::new()
        .route("/mural", post(routes::mural::create))
        .route("/mural/{id}", delete(routes::mural::remove))
        .route("/users", get(routes::users::list))
        .route("/users/{id}/role", patch(routes::users::update_role))
        .layer(middleware::from_fn(AuthMiddleware::require_admin))
        .layer(middleware::from_fn_with_state(
            jwt_service.clone(),
            AuthMiddleware::authenticate,
        ));

    // Authenticated, but open to any role
    let member_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .layer(middleware::from_fn_with_state(
            jwt_service.clone(),
            AuthMiddleware::authenticate,
        ));

    let public_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/mural", get(routes::mural::list))
        .route(
            "/community",
            get(routes::community::feed).post(routes::community::create_post),
        )
        .route("/community/{id}/like", post(routes::community::toggle_like))
        .route(
            "/community/{id}/comments",
            post(routes::community::create_comment).get(routes::community::list_comments),
        );

    Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(app_state)
}

/// Starts the Conecta HTTP server.
///
/// Connects the database pool, applies pending migrations, wires the
/// router, and serves until a shutdown signal arrives. The pool is closed
/// before returning.
pub async fn start(config: Config) -> Result<()> {
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

    let mut db_config = DatabaseConfig::from_url(&config.database.url)?;
    db_config.max_size = config.database.max_connections;
    let db = Arc::new(DatabaseConnection::new(db_config).await?);
    db.migrate().await?;

    let app_state = AppState {
        jwt_service,
        db: db.clone(),
    };
    let app = build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 Conecta Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
