//! # HTTP Server
//!
//! Combines the health routes and one CRUD route set per catalog resource
//! into a single Axum router. The store is built by the caller and shared
//! by every route set.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::ServerConfig;
use super::observability_routes::health_routes;
use super::resource_routes::resource_routes;
use crate::models::{Distributor, Film};
use crate::observability::Event;
use crate::storage::DocumentStore;

/// HTTP Server for the film catalog
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`
    pub fn new<S: DocumentStore + 'static>(config: ServerConfig, store: Arc<S>) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(
            event = Event::ServerStart.as_str(),
            addr = %listener.local_addr()?,
            "listening; resources at /films and /distributors"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!(event = Event::ServerStop.as_str(), "server stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router<S: DocumentStore + 'static>(config: &ServerConfig, store: Arc<S>) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(resource_routes::<Film, S>(store.clone()))
        .merge(resource_routes::<Distributor, S>(store))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog_schemas;
    use crate::storage::MemoryStore;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new(catalog_schemas()))
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(ServerConfig::default(), store());
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(ServerConfig::with_port(8080), store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:5173".into(), "not a header\n".into()],
            ..Default::default()
        };
        let _router = build_router(&config, store());
    }
}
