//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::auth_routes::{auth_routes, AuthState};
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, HealthState};
use super::user_routes::{user_routes, UserState};
use crate::auth::AuthService;
use crate::observability::Event;
use crate::store::{RecordStore, Records};
use crate::users::UserService;

/// HTTP server for otpdesk
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `store`
    pub fn new(config: HttpServerConfig, store: Arc<dyn RecordStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, store: Arc<dyn RecordStore>) -> Router {
        let records = Records::new(store);
        let auth_state = Arc::new(AuthState::new(AuthService::new(records.clone())));
        let user_state = Arc::new(UserState::new(UserService::new(records)));

        Router::new()
            .merge(health_routes(Arc::new(HealthState::new())))
            .merge(auth_routes(auth_state))
            .merge(user_routes(user_state))
            .layer(TraceLayer::new_for_http())
            .layer(config.cors_layer())
    }

    /// Bind and serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(addr).await?;
        info!(
            event = Event::Serving.as_str(),
            address = %addr,
            "server running on http://{}",
            addr
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!(event = Event::ShutdownComplete.as_str(), "server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!(event = Event::ShutdownStart.as_str(), "received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!(event = Event::ShutdownStart.as_str(), "received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_server_keeps_listen_address() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::new(config, Arc::new(InMemoryStore::new()));
        assert_eq!(server.config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::build_router(&config, Arc::new(InMemoryStore::new()));
    }
}
