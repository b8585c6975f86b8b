//! # HTTP Server
//!
//! Web shell around the analysis pipeline: upload a dataset, get the report
//! and map layer back.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::analyze_routes::{analyze_routes, AnalyzeState};
use super::health_routes::health_routes;
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event};

/// HTTP server for reactor analysis
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    /// Create a server from the full configuration
    pub fn new(config: Config) -> Self {
        let addr = config.http.socket_addr();
        let router = Self::build_router(config);
        Self { addr, router }
    }

    fn build_router(config: Config) -> Router {
        let cors = if config.http.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .http
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let analyze_state = Arc::new(AnalyzeState::new(config));

        Router::new()
            .merge(health_routes())
            .merge(analyze_routes(analyze_state))
            .layer(ServiceBuilder::new().layer(cors))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.addr.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.addr, e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_server::HttpServerConfig;

    #[test]
    fn test_server_uses_configured_port() {
        let config = Config {
            http: HttpServerConfig::with_port(9090),
            ..Config::default()
        };
        let server = HttpServer::new(config);
        assert_eq!(server.socket_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn test_router_builds() {
        let _router = HttpServer::new(Config::default()).router();
    }
}
