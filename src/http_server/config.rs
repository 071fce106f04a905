//! HTTP Server Configuration
//!
//! Listen address and the CORS policy applied to every route.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Listen address and allowed browser origins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    pub host: IpAddr,
    pub port: u16,

    /// Origins allowed to call the API from a browser. Empty allows any.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// CORS layer for the configured origins. Entries that are not valid
    /// header values are skipped.
    pub fn cors_layer(&self) -> CorsLayer {
        let origin = if self.cors_origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(self.cors_origins.iter().filter_map(|s| s.parse().ok()))
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
