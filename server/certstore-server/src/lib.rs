//! CertStore Server - certificate and private key record API
//!
//! This library wires the certificate pipeline and the record store into an
//! axum router. Handlers stay thin: they check path identifiers and request
//! shape, hand the payload to `certificate-engine`, and persist through the
//! repository traits from `database-layer`.

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use error::*;
pub use server::{CertStoreServer, ServerConfig};

use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the main application router with all routes and middleware
pub fn create_app(server: CertStoreServer) -> Router {
    let timeout = server.config.request_timeout();
    let body_limit = server.config.max_body_bytes;

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(timeout))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(server)
}
