//! Axum server setup
//!
//! - Tracing, timeout and body-limit middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{StatusCode, Uri};
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use mdwiki_core::RenderOptions;

use super::error::ApiError;
use super::routes;
use crate::templates::{self, TemplateError, Templates};

/// Largest accepted request body (page edits included)
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8080)
    pub bind_addr: SocketAddr,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Markdown rendering switches
    pub markdown: RenderOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            request_timeout: Duration::from_secs(30),
            markdown: RenderOptions::default(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub pool: SqlitePool,
    pub templates: &'static Templates,
    pub markdown: RenderOptions,
}

impl AppState {
    pub fn new(pool: SqlitePool, markdown: RenderOptions) -> Result<Self, TemplateError> {
        Ok(Self {
            pool,
            templates: templates::shared()?,
            markdown,
        })
    }
}

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Timeout sits innermost: it builds its own 408 body and needs the
    // plain axum body underneath it.
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .merge(routes::pages::router())
        .merge(routes::health::router())
        .fallback(not_found)
        .layer(middleware)
        .with_state(Arc::new(state))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "path",
        id: uri.path().to_owned(),
    }
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// The database must already be migrated.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// migrations::run(&pool).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: SqlitePool, config: ServerConfig) -> Result<(), ServerError> {
    let state = AppState::new(pool, config.markdown)?;
    let app = build_router(state, config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Http server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
