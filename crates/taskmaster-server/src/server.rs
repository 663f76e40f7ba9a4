//! `ApiServer` — Axum HTTP server wiring.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::{delete, get, post};
use taskmaster_store::{ConnectionPool, PooledConnection};
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::ApiError;
use crate::health::{self, HealthResponse};
use crate::routes::{tasks, xml};
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: ConnectionPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// When the server started.
    pub start_time: Instant,
}

impl AppState {
    /// Check out a pooled connection, mapping pool exhaustion to an API error.
    pub fn conn(&self) -> Result<PooledConnection, ApiError> {
        self.pool
            .get()
            .map_err(|e| ApiError::storage(&self.config, e))
    }
}

/// The TaskMaster HTTP server.
pub struct ApiServer {
    config: Arc<ServerConfig>,
    pool: ConnectionPool,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl ApiServer {
    /// Create a new server over an already-migrated pool.
    pub fn new(config: ServerConfig, pool: ConnectionPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            pool: self.pool.clone(),
            config: self.config.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
            .route("/api/tasks/completed", delete(tasks::clear_completed))
            .route(
                "/api/tasks/{id}",
                get(tasks::get_task)
                    .put(tasks::update_task)
                    .patch(tasks::toggle_task)
                    .delete(tasks::delete_task),
            )
            .route("/api/stats", get(tasks::stats))
            .route("/api/deadlines", get(tasks::deadlines))
            .route("/api/export", get(xml::export))
            .route("/api/import", post(xml::import))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve. Returns the bound address and the serve task; the
    /// task finishes once [`ShutdownCoordinator::shutdown`] is called.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;
        let app = self.router();
        let token = self.shutdown.token();

        let handle = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "server error");
            }
        });

        Ok((addr, handle))
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
