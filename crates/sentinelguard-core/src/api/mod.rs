//! REST API implementation
//!
//! This module provides the HTTP API for SentinelGuard.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use handlers::AppState;
pub use routes::create_router;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::service::AlertService;

/// HTTP API server
pub struct HttpServer {
    state: AppState,
    config: Config,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(alerts: AlertService, config: Config) -> Self {
        Self {
            state: AppState { alerts },
            config,
        }
    }

    /// Prepare the store and serve until `shutdown` resolves
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.state.alerts.store().initialize().await;

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .max_age(Duration::from_secs(3600));

        let app = create_router(self.state, &self.config.server)
            .layer(cors)
            .layer(TraceLayer::new_for_http());

        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::internal(format!("failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on {}", addr);

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::internal(e.to_string()))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
