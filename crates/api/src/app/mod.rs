//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: infrastructure wiring (stock store + observer + service)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and mapping to domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use sockwarehouse_infra::StoreError;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> Result<Router, StoreError> {
    let services = Arc::new(services::build_services(config).await?);
    Ok(router_with_services(services, config))
}

/// Router over already-built services (tests inject their own).
pub fn router_with_services(services: Arc<services::AppServices>, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .route("/info", get(routes::system::info))
        .merge(routes::router(config.max_upload_bytes))
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_logging)),
        )
}
