pub mod paths;

use crate::{
    handlers::{certificates, health, users},
    openapi,
    server::CertStoreServer,
};
use axum::{
    routing::{get, post},
    Router,
};

/// Create health check routes
pub fn health_routes() -> Router<CertStoreServer> {
    Router::new()
        .route(paths::INDEX, get(health::index))
        .route(paths::health::HEALTH, get(health::health_check))
}

/// Create user routes
pub fn user_routes() -> Router<CertStoreServer> {
    Router::new()
        .route(paths::users::USERS, post(users::create_user))
        .route(
            paths::users::USER_BY_ID,
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create certificate routes
pub fn certificate_routes() -> Router<CertStoreServer> {
    Router::new()
        .route(
            paths::certificates::CERTIFICATES,
            post(certificates::create_certificate),
        )
        .route(
            paths::certificates::CERTIFICATE_BY_ID,
            get(certificates::get_certificate)
                .patch(certificates::update_certificate)
                .delete(certificates::delete_certificate),
        )
}

/// Create API documentation routes
pub fn docs_routes() -> Router<CertStoreServer> {
    Router::new().route(paths::docs::OPENAPI_JSON, get(openapi::openapi_json))
}

/// Create all routes
pub fn create_routes() -> Router<CertStoreServer> {
    Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(certificate_routes())
        .merge(docs_routes())
}
