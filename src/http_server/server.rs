//! # HTTP Server
//!
//! Main HTTP server combining the result, statistics and health routers
//! under `/api`.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::errors::ApiError;
use super::health_routes::health_routes;
use super::results_routes::{results_routes, ResultsState};
use super::stats_routes::stats_routes;
use crate::store::{InMemoryResultRepository, ResultRepository};

/// HTTP server for the results API
pub struct HttpServer {
    config: HttpServerConfig,
    repository: Arc<dyn ResultRepository>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server owning a fresh in-memory store
    pub fn with_config(config: HttpServerConfig) -> Self {
        let repository: Arc<dyn ResultRepository> = if config.seed_sample_data {
            Arc::new(InMemoryResultRepository::seeded())
        } else {
            Arc::new(InMemoryResultRepository::new())
        };
        Self::with_repository(config, repository)
    }

    /// Create a server over an existing store
    pub fn with_repository(config: HttpServerConfig, repository: Arc<dyn ResultRepository>) -> Self {
        let router = Self::build_router(&config, repository.clone());
        Self {
            config,
            repository,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, repository: Arc<dyn ResultRepository>) -> Router {
        let state = Arc::new(ResultsState::new(repository));

        let api = Router::new()
            .merge(health_routes())
            .merge(results_routes(state.clone()))
            .merge(stats_routes(state));

        with_middleware(Router::new().nest("/api", api), config)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Handle to the store served by this server
    pub fn repository(&self) -> Arc<dyn ResultRepository> {
        self.repository.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        info!(%addr, "results API listening");
        info!("API endpoints available at http://{}/api", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap `router` with tracing, panic recovery and CORS.
fn with_middleware(router: Router, config: &HttpServerConfig) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin)
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(cors),
    )
}

/// Render a handler panic as a 500 so the process keeps serving.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    ApiError::Internal(details).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
